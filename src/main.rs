//! # phash CLI
//!
//! Command-line interface for perceptual image hashing.
//!
//! ## Usage
//! ```bash
//! phash photo.png --hash
//! phash photo.png --compare 0000000000000000
//! ```

mod cli;

use clap::Parser;
use console::{style, Term};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let term = Term::stderr();

    if let Err(e) = perceptual_hash_cli::init_tracing(cli.verbose) {
        term.write_line(&format!("{} {}", style("warning:").yellow().bold(), e))
            .ok();
    }

    match cli::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            term.write_line(&format!("{} {}", style("error:").red().bold(), e))
                .ok();
            ExitCode::FAILURE
        }
    }
}
