//! Error types for rcblock-fs

use std::path::PathBuf;

/// Result type for rcblock-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rcblock-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid {what} '{value}': {reason}")]
    InvalidIdentifier {
        what: String,
        value: String,
        reason: String,
    },

    #[error("{path} is not valid UTF-8 text")]
    NotText { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
