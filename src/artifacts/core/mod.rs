//! Shared types used across the artifacts

pub mod error;
