//! # Perceptual Hash CLI
//!
//! Computes average-hash fingerprints for images and compares an image
//! against a previously computed fingerprint.
//!
//! ## Architecture
//! - `core` - Image decoding, hashing and command dispatch
//! - `error` - Error taxonomy shared by the library and the binary

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{HashParseError, ImageDecodeError, PhashError, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the library
///
/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// takes precedence; otherwise `debug` when `verbose`, else `warn`.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PhashError::Config(format!("failed to install tracing subscriber: {e}")))
}
