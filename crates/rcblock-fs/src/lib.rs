//! Filesystem primitives for rcblock
//!
//! Provides home-relative path resolution, atomic read-modify-write I/O,
//! create-once sibling backups and format-agnostic configuration loading.

pub mod backup;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use backup::{BackupOutcome, SiblingBackup};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{DocumentPath, validate_identifier};
