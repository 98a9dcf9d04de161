//! # Hasher Module
//!
//! Computes, renders, parses and compares average hashes.
//!
//! ## How It Works
//! 1. Convert the decoded image to grayscale
//! 2. Resize to a small grid (8x8 by default)
//! 3. Set one bit per pixel brighter than the grid's mean
//! 4. Compare hashes using Hamming distance
//!
//! ## Example
//! ```rust,ignore
//! use perceptual_hash_cli::core::hasher::HasherConfig;
//!
//! let hasher = HasherConfig::new().hash_size(8).build()?;
//! let hash = hasher.hash_file(&path)?;
//! println!("{hash}");
//! ```

mod average;
mod traits;

pub use average::{luma_601, AverageHasher};
pub use traits::{HashAlgorithm, ImageHash, DEFAULT_HASH_SIZE};

use crate::error::PhashError;

/// Smallest supported grid edge
pub const MIN_HASH_SIZE: u32 = 4;
/// Largest supported grid edge
pub const MAX_HASH_SIZE: u32 = 64;

/// Configuration builder for hashers
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Hash size (edge length of the grid)
    hash_size: u32,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            hash_size: DEFAULT_HASH_SIZE,
        }
    }

    /// Set the hash size.
    ///
    /// - 8: 64 bits, 16 hex digits (default)
    /// - 16: 256 bits, 64 hex digits
    pub fn hash_size(mut self, size: u32) -> Self {
        self.hash_size = size;
        self
    }

    /// Build the hasher.
    ///
    /// The size must be a multiple of 4 so the bit count fills whole bytes.
    pub fn build(self) -> Result<AverageHasher, PhashError> {
        if !(MIN_HASH_SIZE..=MAX_HASH_SIZE).contains(&self.hash_size) || self.hash_size % 4 != 0 {
            return Err(PhashError::Config(format!(
                "hash size {} must be a multiple of 4 between {} and {}",
                self.hash_size, MIN_HASH_SIZE, MAX_HASH_SIZE
            )));
        }
        Ok(AverageHasher::new(self.hash_size))
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}
