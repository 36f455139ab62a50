//! Error types for rcblock-blocks

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] rcblock_fs::Error),

    #[error(
        "Partial block '{block}' in {path}: found {starts} start and {ends} end marker(s) that do not pair up; \
         remove the leftover markers by hand and retry"
    )]
    PartialBlock {
        path: PathBuf,
        block: String,
        starts: usize,
        ends: usize,
    },

    #[error("Invalid markers for block '{block}': {reason}")]
    InvalidMarker { block: String, reason: String },

    #[error("Line {index} of block '{block}' is identical to one of its markers")]
    InvalidBody { block: String, index: usize },
}
