//! Core repository components
//!
//! This module contains the filesystem-facing building blocks of a repository:
//!
//! - `database`: Loose-object database for storing blobs, trees, and commits
//! - `repository`: High-level repository operations and coordination
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod repository;
pub mod workspace;
