//! # CLI Module
//!
//! Command-line interface for the perceptual hash tool.
//!
//! ## Usage
//! ```bash
//! # Print the image's average hash
//! phash photo.png --hash
//!
//! # Hamming distance between a known hash and the image
//! phash photo.png --compare 8F0F0F0F0F0F0F0F
//!
//! # Both, as JSON lines
//! phash photo.png --hash --compare 8F0F0F0F0F0F0F0F --output json
//! ```

use clap::{Parser, ValueEnum};
use perceptual_hash_cli::core::command::{dispatch, OutputFormat as CoreOutputFormat, RunConfig};
use perceptual_hash_cli::core::hasher::DEFAULT_HASH_SIZE;
use perceptual_hash_cli::error::Result;
use std::io;
use std::path::PathBuf;

/// Compute and compare perceptual image hashes
#[derive(Parser, Debug)]
#[command(name = "phash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to image to hash
    pub image_path: PathBuf,

    /// Hash provided image
    #[arg(long)]
    pub hash: bool,

    /// Compare image with hash
    #[arg(long, value_name = "HASH")]
    pub compare: Option<String>,

    /// Hash grid edge length (multiple of 4, 4-64)
    #[arg(long, default_value_t = DEFAULT_HASH_SIZE)]
    pub hash_size: u32,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub output: OutputFormat,

    /// Verbose logging on stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Bare hash or distance
    Plain,
    /// One JSON object per line
    Json,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Plain => CoreOutputFormat::Plain,
            OutputFormat::Json => CoreOutputFormat::Json,
        }
    }
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        let mut config = RunConfig::new(cli.image_path.clone())
            .with_hash_size(cli.hash_size)
            .with_output(cli.output.into());
        if cli.hash {
            config = config.with_hash();
        }
        if let Some(hash) = &cli.compare {
            config = config.with_compare(hash.clone());
        }
        config
    }
}

/// Run the parsed CLI, writing command output to stdout
pub fn run(cli: &Cli) -> Result<()> {
    let config = RunConfig::from(cli);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(&config, &mut out)?;
    Ok(())
}
