//! Error types for rcblock-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from rcblock-core
    #[error(transparent)]
    Core(#[from] rcblock_core::Error),

    /// Error from rcblock-blocks
    #[error(transparent)]
    Blocks(#[from] rcblock_blocks::Error),

    /// Error from rcblock-fs
    #[error(transparent)]
    Fs(#[from] rcblock_fs::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
