//! The marked-block patcher.
//!
//! Every operation follows the same read-modify-write cycle:
//!
//! 1. read the document (a missing file is an empty document),
//! 2. scan it for the block and refuse unbalanced markers,
//! 3. compute the new content in memory,
//! 4. unless dry-running: back up the pre-existing file once, then write
//!    atomically.

use std::collections::HashSet;
use std::path::PathBuf;

use rcblock_fs::{DocumentPath, SiblingBackup, io};
use serde::Serialize;

use crate::parser::{BlockScan, scan, split_lines};
use crate::writer::{join_lines, replace_all, strip_regions};
use crate::{BlockSpec, Error, Result, diff};

/// What a patch or removal did (or would do, in dry-run mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatchAction {
    /// The document already holds exactly the desired block.
    AlreadyConfigured,
    /// The document did not exist and was created with the block.
    Created,
    /// The document existed without the block; the block was appended.
    Appended,
    /// One stale copy was replaced.
    Replaced,
    /// Several copies were collapsed into one fresh copy.
    Collapsed { copies: usize },
    /// Every copy of the block was removed.
    Removed { copies: usize },
    /// Nothing to remove.
    NotPresent,
}

impl PatchAction {
    /// Whether the document content differs after the operation.
    pub fn changes_document(&self) -> bool {
        !matches!(self, Self::AlreadyConfigured | Self::NotPresent)
    }

    fn verb(&self) -> &'static str {
        match self {
            Self::AlreadyConfigured => "keep",
            Self::Created => "create",
            Self::Appended => "append",
            Self::Replaced => "replace",
            Self::Collapsed { .. } => "collapse",
            Self::Removed { .. } => "remove",
            Self::NotPresent => "skip",
        }
    }
}

/// Report for one document and one block.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOutcome {
    pub path: PathBuf,
    pub block: String,
    pub action: PatchAction,
    /// True when the new content was written to disk.
    pub applied: bool,
    pub dry_run: bool,
    /// Backup file created by this call, if any.
    pub backup: Option<PathBuf>,
    #[serde(skip)]
    pub before: String,
    #[serde(skip)]
    pub after: String,
}

impl PatchOutcome {
    pub fn changed(&self) -> bool {
        self.action.changes_document()
    }

    /// Unified diff of the change, empty for no-ops.
    pub fn unified_diff(&self) -> String {
        diff::unified_diff(&self.path.display().to_string(), &self.before, &self.after)
    }

    /// One-line summary, `[dry-run] Would ...` prefixed in dry-run mode.
    pub fn describe(&self) -> String {
        let target = self.path.display();
        let detail = match self.action {
            PatchAction::AlreadyConfigured => {
                return format!("Block '{}' in {target} is already configured", self.block);
            }
            PatchAction::NotPresent => {
                return format!("Block '{}' is not present in {target}", self.block);
            }
            PatchAction::Collapsed { copies } | PatchAction::Removed { copies } if copies > 1 => {
                format!(" ({copies} copies)")
            }
            _ => String::new(),
        };

        if self.dry_run {
            format!(
                "[dry-run] Would {} block '{}' in {target}{detail}",
                self.action.verb(),
                self.block
            )
        } else {
            let mut verb = self.action.verb().to_string();
            verb.push_str(if verb.ends_with('e') { "d" } else { "ed" });
            let mut msg = format!("{} block '{}' in {target}{detail}", capitalize(&verb), self.block);
            if let Some(backup) = &self.backup {
                msg.push_str(&format!(", backup at {}", backup.display()));
            }
            msg
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Read-only view of a block in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BlockStatus {
    /// The block (or the whole document) is missing.
    Absent,
    /// Exactly one well-formed copy.
    Present { body: Vec<String> },
    /// More than one well-formed copy.
    Duplicated { copies: usize },
    /// Markers that do not pair up.
    Partial { starts: usize, ends: usize },
}

/// Keeps exactly one up-to-date copy of a block in each patched document.
///
/// A patcher instance remembers which documents it has already backed up, so
/// at most one backup is taken per document over its lifetime; an existing
/// backup file on disk is never overwritten either.
///
/// # Example
/// ```no_run
/// use rcblock_blocks::{BlockSpec, MarkedBlockPatcher};
/// use rcblock_fs::DocumentPath;
///
/// let mut patcher = MarkedBlockPatcher::new("rcblock")?;
/// let spec = BlockSpec::namespaced("rcblock", "env")?;
/// let outcome = patcher.patch(
///     &DocumentPath::from("/home/me/.bashrc"),
///     &spec,
///     &["export MAMBA_ROOT_PREFIX=\"/opt/mamba\""],
/// )?;
/// println!("{}", outcome.describe());
/// # Ok::<(), rcblock_blocks::Error>(())
/// ```
#[derive(Debug)]
pub struct MarkedBlockPatcher {
    backup: SiblingBackup,
    dry_run: bool,
    backed_up: HashSet<PathBuf>,
    writes: usize,
}

impl MarkedBlockPatcher {
    /// Create a patcher whose backups use `<path>.bak.<namespace>`.
    pub fn new(namespace: &str) -> Result<Self> {
        Ok(Self {
            backup: SiblingBackup::new(namespace)?,
            dry_run: false,
            backed_up: HashSet::new(),
            writes: 0,
        })
    }

    /// Compute and report changes without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Number of document writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Backup location this patcher uses for `path`.
    pub fn backup_path(&self, path: &DocumentPath) -> PathBuf {
        self.backup.path_for(path)
    }

    /// Ensure `path` contains exactly one copy of `spec` with `body`.
    ///
    /// # Errors
    /// - `Error::InvalidBody` if a body line equals one of the markers
    /// - `Error::PartialBlock` if the markers in the document do not pair up;
    ///   the document is left untouched
    /// - `Error::Fs` on read, backup or write failures
    pub fn patch<S: AsRef<str>>(
        &mut self,
        path: &DocumentPath,
        spec: &BlockSpec,
        body: &[S],
    ) -> Result<PatchOutcome> {
        spec.check_body(body)?;
        let original = io::read_document(path)?;
        let before = original.clone().unwrap_or_default();
        let lines = split_lines(&before);
        let desired = spec.render(body);

        let (action, after) = match scan(&lines, spec) {
            BlockScan::Partial { starts, ends } => {
                return Err(partial(path, spec, starts, ends));
            }
            BlockScan::Absent => {
                let action = if original.is_some() {
                    PatchAction::Appended
                } else {
                    PatchAction::Created
                };
                (action, join_lines(&replace_all(&lines, &[], &desired)))
            }
            BlockScan::Found(regions) if regions.len() == 1 => {
                if regions[0].lines(&lines) == desired {
                    tracing::debug!(path = %path, block = spec.name(), "block already configured");
                    (PatchAction::AlreadyConfigured, before.clone())
                } else {
                    (
                        PatchAction::Replaced,
                        join_lines(&replace_all(&lines, &regions, &desired)),
                    )
                }
            }
            BlockScan::Found(regions) => {
                tracing::warn!(
                    path = %path,
                    block = spec.name(),
                    copies = regions.len(),
                    "found duplicate blocks, collapsing into one"
                );
                (
                    PatchAction::Collapsed {
                        copies: regions.len(),
                    },
                    join_lines(&replace_all(&lines, &regions, &desired)),
                )
            }
        };

        self.finish(path, spec, action, original, before, after)
    }

    /// Remove every copy of `spec` from `path`.
    ///
    /// A missing document or block is a no-op. Unbalanced markers are
    /// refused exactly as in [`patch`](Self::patch).
    pub fn remove(&mut self, path: &DocumentPath, spec: &BlockSpec) -> Result<PatchOutcome> {
        let original = io::read_document(path)?;
        let before = original.clone().unwrap_or_default();
        let lines = split_lines(&before);

        let (action, after) = match scan(&lines, spec) {
            BlockScan::Partial { starts, ends } => {
                return Err(partial(path, spec, starts, ends));
            }
            BlockScan::Absent => (PatchAction::NotPresent, before.clone()),
            BlockScan::Found(regions) => (
                PatchAction::Removed {
                    copies: regions.len(),
                },
                join_lines(&strip_regions(&lines, &regions)),
            ),
        };

        self.finish(path, spec, action, original, before, after)
    }

    /// Report the state of `spec` in `path` without modifying anything.
    pub fn inspect(&self, path: &DocumentPath, spec: &BlockSpec) -> Result<BlockStatus> {
        let content = io::read_document(path)?.unwrap_or_default();
        let lines = split_lines(&content);

        Ok(match scan(&lines, spec) {
            BlockScan::Absent => BlockStatus::Absent,
            BlockScan::Partial { starts, ends } => BlockStatus::Partial { starts, ends },
            BlockScan::Found(regions) if regions.len() == 1 => BlockStatus::Present {
                body: regions[0]
                    .body(&lines)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
            BlockScan::Found(regions) => BlockStatus::Duplicated {
                copies: regions.len(),
            },
        })
    }

    fn finish(
        &mut self,
        path: &DocumentPath,
        spec: &BlockSpec,
        action: PatchAction,
        original: Option<String>,
        before: String,
        after: String,
    ) -> Result<PatchOutcome> {
        let mut outcome = PatchOutcome {
            path: path.to_path_buf(),
            block: spec.name().to_string(),
            action,
            applied: false,
            dry_run: self.dry_run,
            backup: None,
            before,
            after,
        };

        if !action.changes_document() {
            return Ok(outcome);
        }
        if self.dry_run {
            tracing::info!(path = %path, block = spec.name(), ?action, "dry-run, not writing");
            return Ok(outcome);
        }

        let first_write = !self.backed_up.contains(path.as_path());
        if let Some(original) = &original
            && first_write
        {
            let backup = self.backup.ensure(path, original)?;
            if backup.is_created() {
                outcome.backup = Some(backup.path().clone());
            }
        }

        io::write_text(path, &outcome.after)?;
        // A document this patcher created holds no user content worth saving
        self.backed_up.insert(path.to_path_buf());
        self.writes += 1;
        outcome.applied = true;
        tracing::info!(path = %path, block = spec.name(), ?action, "document updated");

        Ok(outcome)
    }
}

fn partial(path: &DocumentPath, spec: &BlockSpec, starts: usize, ends: usize) -> Error {
    tracing::error!(path = %path, block = spec.name(), starts, ends, "refusing to patch partial block");
    Error::PartialBlock {
        path: path.to_path_buf(),
        block: spec.name().to_string(),
        starts,
        ends,
    }
}
