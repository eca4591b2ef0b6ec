//! Object store data structures and codecs
//!
//! Nothing in here touches the filesystem:
//!
//! - `core`: Shared error taxonomy
//! - `database`: Compression of stored frames
//! - `objects`: Object ids, types, the loose-object codec, trees and commits

pub mod core;
pub mod database;
pub mod objects;
