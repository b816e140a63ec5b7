//! Shared error types for the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dupmap operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message} ({path})", path = .path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Parse failure for a single file; recoverable at the ingestion boundary
    #[error("Parse error in {file}: {message}", file = .file.display())]
    Parse { file: PathBuf, message: String },

    /// Invalid option values (thresholds, costs)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid include patterns
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Internal invariant violations; fatal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, Error>;
