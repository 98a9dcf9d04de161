//! # Core Module
//!
//! ## Modules
//! - `decoder` - Loads image files into pixel data
//! - `hasher` - Computes, renders, parses and compares average hashes
//! - `command` - Resolves a run configuration into commands and executes them

pub mod command;
pub mod decoder;
pub mod hasher;

// Re-export commonly used types
pub use command::{dispatch, Command, OutputFormat, RunConfig};
pub use hasher::{AverageHasher, HashAlgorithm, HasherConfig, ImageHash};
