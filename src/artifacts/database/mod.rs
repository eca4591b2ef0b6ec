//! Storage-level transforms
//!
//! Byte-buffer transforms applied to encoded frames on their way to and from
//! disk. Nothing here knows about the object format.

pub mod compression;
