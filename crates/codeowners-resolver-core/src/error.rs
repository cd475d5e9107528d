//! Error types for loading rule files.
//!
//! These errors never cross the resolver's public API: the resolver logs them
//! and treats the rule file as absent for that attempt.

use std::path::PathBuf;
use thiserror::Error;

/// An error that occurred while loading a rule file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The rule file exists but could not be read.
    #[error("failed to read rule file '{}': {source}", path.display())]
    Read {
        /// Path of the rule file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Creates a read error for `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
