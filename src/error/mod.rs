//! # Error Module
//!
//! Error types for the perceptual hash CLI.
//!
//! ## Design Principles
//! - **Never panic** on user input - return errors instead
//! - **Include context** - the offending path or hash text
//! - **Opaque kinds** - callers match on variants, not on message text

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PhashError {
    #[error("Image decode error: {0}")]
    Decode(#[from] ImageDecodeError),

    #[error("Hash parse error: {0}")]
    Parse(#[from] HashParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors that occur while loading an image into pixel data
#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("Image not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported image format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },
}

impl ImageDecodeError {
    /// Map an I/O failure on `path`, keeping "not found" distinct.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Errors that occur when reading a hash from hex text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("Expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Cannot compare a {left}-bit hash with a {right}-bit hash")]
    SizeMismatch { left: u32, right: u32 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PhashError>;
