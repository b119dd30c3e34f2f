//! Error types for the fanlog_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fanlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred while writing, stating or reopening a destination
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The compressed archive could not be moved into place
    #[error("Failed to persist archive {path:?}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
