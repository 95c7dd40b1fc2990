//! Error types for afterglow.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or driving the simulation.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Malformed configuration: bad gradient stops, grid size, names.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Gradient rank or grid coordinate outside bounds.
    #[error("index {index} out of range (len {len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of valid entries.
        len: usize,
    },

    /// Settings file exists but could not be parsed.
    #[error("failed to parse {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LifeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
