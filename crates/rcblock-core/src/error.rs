//! Error types for rcblock-core

use std::path::PathBuf;

/// Result type for rcblock-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rcblock-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is inconsistent
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// No home directory configured or detectable
    #[error("Could not determine the home directory; set `home` in the config or pass --home")]
    NoHome,

    /// Unknown shell dialect or block kind
    #[error("Unknown {what}: {value}")]
    Unknown { what: &'static str, value: String },

    /// Configuration file missing where one was requested explicitly
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Filesystem error from rcblock-fs
    #[error(transparent)]
    Fs(#[from] rcblock_fs::Error),

    /// Patching error from rcblock-blocks
    #[error(transparent)]
    Blocks(#[from] rcblock_blocks::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
