//! Command implementations
//!
//! Every command is an `impl Repository` block writing its output to the
//! repository's writer.
//!
//! - `plumbing`: Low-level commands for direct object manipulation
//! - `porcelain`: Repository setup

pub mod plumbing;
pub mod porcelain;
