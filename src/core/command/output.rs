//! Rendering command results as output lines.

use crate::core::hasher::ImageHash;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Output line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Bare hash or distance
    #[default]
    Plain,
    /// One JSON object per line
    Json,
}

/// Result of one executed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum CommandOutcome {
    Hash {
        #[serde(serialize_with = "serialize_lossy_path")]
        path: PathBuf,
        hash: ImageHash,
    },
    Compare {
        #[serde(serialize_with = "serialize_lossy_path")]
        path: PathBuf,
        expected: ImageHash,
        actual: ImageHash,
        distance: u32,
    },
}

/// Non-UTF-8 bytes become U+FFFD instead of failing the whole line
fn serialize_lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

impl CommandOutcome {
    /// Render as a single line without the trailing newline
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Plain => Ok(match self {
                CommandOutcome::Hash { hash, .. } => hash.to_hex(),
                CommandOutcome::Compare { distance, .. } => distance.to_string(),
            }),
            OutputFormat::Json => serde_json::to_string(self),
        }
    }
}
