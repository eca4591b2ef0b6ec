//! A minimal content-addressed object store in the layout git uses for loose objects.
//!
//! - `artifacts`: object ids, the loose-object codec, compression, tree and commit encoding
//! - `areas`: the on-disk object database, workspace access and the repository handle
//! - `commands`: plumbing commands built on top of the database

pub mod areas;
pub mod artifacts;
pub mod commands;
