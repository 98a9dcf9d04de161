//! # Command Module
//!
//! Turns an explicit [`RunConfig`] into an ordered list of [`Command`]s and
//! executes them, writing one line per command.
//!
//! `--hash` and `--compare` are independent: when both are given the hash is
//! printed first, then the distance. When neither is given nothing runs.

mod output;

pub use output::{CommandOutcome, OutputFormat};

use crate::core::hasher::{HashAlgorithm, HasherConfig, DEFAULT_HASH_SIZE};
use crate::error::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything a single invocation needs, built once by the entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Image to hash or compare
    pub image_path: PathBuf,
    /// Print the image's hash
    pub hash: bool,
    /// Hex hash to compare the image against
    pub compare: Option<String>,
    /// Hash grid edge length
    pub hash_size: u32,
    /// Output line format
    pub output: OutputFormat,
}

impl RunConfig {
    /// Configuration with no operations selected
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            hash: false,
            compare: None,
            hash_size: DEFAULT_HASH_SIZE,
            output: OutputFormat::Plain,
        }
    }

    /// Request the hash operation
    pub fn with_hash(mut self) -> Self {
        self.hash = true;
        self
    }

    /// Request the compare operation against `hash`
    pub fn with_compare(mut self, hash: impl Into<String>) -> Self {
        self.compare = Some(hash.into());
        self
    }

    /// Set the hash grid edge length
    pub fn with_hash_size(mut self, hash_size: u32) -> Self {
        self.hash_size = hash_size;
        self
    }

    /// Set the output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Resolve the requested operations in execution order.
    ///
    /// Empty compare text counts as not requested.
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(2);
        if self.hash {
            commands.push(Command::Hash(HashCommand {
                image_path: self.image_path.clone(),
            }));
        }
        if let Some(expected) = self.compare.as_deref().filter(|s| !s.is_empty()) {
            commands.push(Command::Compare(CompareCommand {
                expected: expected.to_string(),
                image_path: self.image_path.clone(),
            }));
        }
        commands
    }
}

/// Compute and print the hash of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCommand {
    pub image_path: PathBuf,
}

/// Compare an image against hex hash text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCommand {
    /// Unparsed hash text as supplied by the user
    pub expected: String,
    pub image_path: PathBuf,
}

/// A single requested operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hash(HashCommand),
    Compare(CompareCommand),
}

impl Command {
    /// Run the command. Each call decodes the image afresh.
    pub fn execute(&self, hasher: &dyn HashAlgorithm) -> Result<CommandOutcome> {
        match self {
            Command::Hash(cmd) => {
                debug!(path = %cmd.image_path.display(), "hashing image");
                let hash = hasher.hash_file(&cmd.image_path)?;
                Ok(CommandOutcome::Hash {
                    path: cmd.image_path.clone(),
                    hash,
                })
            }
            Command::Compare(cmd) => {
                debug!(path = %cmd.image_path.display(), expected = %cmd.expected, "comparing image");
                let expected = hasher.parse_hash(&cmd.expected)?;
                let actual = hasher.hash_file(&cmd.image_path)?;
                let distance = expected.try_distance(&actual)?;
                Ok(CommandOutcome::Compare {
                    path: cmd.image_path.clone(),
                    expected,
                    actual,
                    distance,
                })
            }
        }
    }
}

/// Execute every command `config` requests, writing one line each to `out`.
///
/// Lines are written as each command finishes, so output from earlier
/// commands survives a later failure. Returns the number of commands run.
pub fn dispatch<W: Write>(config: &RunConfig, out: &mut W) -> Result<usize> {
    let hasher = HasherConfig::new().hash_size(config.hash_size).build()?;
    let commands = config.commands();

    if commands.is_empty() {
        info!(
            path = %config.image_path.display(),
            "no operation requested; pass --hash and/or --compare <HASH>"
        );
        return Ok(0);
    }

    for command in &commands {
        let outcome = command.execute(&hasher)?;
        let line = outcome.render(config.output)?;
        writeln!(out, "{line}")?;
        out.flush()?;
    }

    Ok(commands.len())
}
