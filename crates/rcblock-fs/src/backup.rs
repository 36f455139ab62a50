//! Single-generation sibling backups
//!
//! A document `~/.bashrc` patched under namespace `rcblock` is backed up to
//! `~/.bashrc.bak.rcblock`. The backup holds the content the document had
//! right before rcblock first modified it and is never overwritten.

use std::path::PathBuf;

use crate::{DocumentPath, Result, io, validate_identifier};

/// What happened when a backup was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A new backup file was written.
    Created(PathBuf),
    /// A backup already existed and was left alone.
    AlreadyPresent(PathBuf),
}

impl BackupOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Created(path) | Self::AlreadyPresent(path) => path,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Creates `<path>.bak.<namespace>` backups next to documents.
#[derive(Debug, Clone)]
pub struct SiblingBackup {
    suffix: String,
}

impl SiblingBackup {
    /// Create a backup policy for the given namespace.
    pub fn new(namespace: &str) -> Result<Self> {
        validate_identifier(namespace, "backup namespace")?;
        Ok(Self {
            suffix: format!("bak.{namespace}"),
        })
    }

    /// Backup location for a document.
    pub fn path_for(&self, document: &DocumentPath) -> PathBuf {
        document.sibling(&self.suffix)
    }

    /// Snapshot `original` unless a backup is already there.
    pub fn ensure(&self, document: &DocumentPath, original: &str) -> Result<BackupOutcome> {
        let path = self.path_for(document);
        if io::create_new(&path, original.as_bytes())? {
            tracing::info!(document = %document, backup = %path.display(), "created backup");
            Ok(BackupOutcome::Created(path))
        } else {
            tracing::debug!(backup = %path.display(), "backup already present, keeping it");
            Ok(BackupOutcome::AlreadyPresent(path))
        }
    }
}
