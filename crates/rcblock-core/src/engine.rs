//! WiringEngine implementation
//!
//! The WiringEngine plans one managed block per (target, block kind) pair and
//! drives a single [`MarkedBlockPatcher`] over the plan, so each startup file
//! is backed up at most once per run.

use std::collections::HashSet;
use std::path::PathBuf;

use rcblock_blocks::{BlockSpec, BlockStatus, MarkedBlockPatcher, PatchOutcome};
use rcblock_fs::DocumentPath;
use serde::Serialize;

use crate::render::Renderer;
use crate::{BlockKind, Result, Shell, WiringConfig};

/// Options for wire and unwire operations
#[derive(Debug, Clone, Copy, Default)]
pub struct WiringOptions {
    /// If true, compute and report changes without modifying the filesystem.
    pub dry_run: bool,
}

/// One block the engine manages in one document.
#[derive(Debug, Clone)]
pub struct PlannedBlock {
    pub path: DocumentPath,
    pub shell: Shell,
    pub kind: BlockKind,
    pub spec: BlockSpec,
    pub body: Vec<String>,
    /// False for blocks switched off in the config; wiring removes them.
    pub enabled: bool,
}

/// Report from a wire or unwire operation
#[derive(Debug, Clone, Serialize)]
pub struct WiringReport {
    /// Whether every document was processed without error
    pub success: bool,
    pub dry_run: bool,
    /// Per-block outcomes, in plan order
    pub outcomes: Vec<PatchOutcome>,
    /// Errors for documents that could not be processed
    pub errors: Vec<String>,
}

impl WiringReport {
    fn new(dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            outcomes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record one result; returns false when the document failed.
    fn record(&mut self, result: rcblock_blocks::Result<PatchOutcome>) -> bool {
        match result {
            Ok(outcome) => {
                tracing::debug!("{}", outcome.describe());
                self.outcomes.push(outcome);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "block operation failed, continuing with remaining targets");
                self.success = false;
                self.errors.push(e.to_string());
                false
            }
        }
    }

    /// Outcomes that changed (or would change) a document.
    pub fn changes(&self) -> impl Iterator<Item = &PatchOutcome> {
        self.outcomes.iter().filter(|o| o.changed())
    }

    pub fn has_changes(&self) -> bool {
        self.changes().next().is_some()
    }
}

/// State of one planned block on disk.
#[derive(Debug, Clone, Serialize)]
pub struct BlockState {
    pub path: PathBuf,
    pub shell: Shell,
    pub block: BlockKind,
    pub status: BlockStatus,
    /// Present exactly once with the desired body.
    pub up_to_date: bool,
}

/// Engine for wiring shell startup files
///
/// Provides three operations:
/// - **apply**: install or refresh every planned block
/// - **unwire**: remove every planned block
/// - **status**: report block state without touching anything
pub struct WiringEngine {
    config: WiringConfig,
    home: PathBuf,
}

impl WiringEngine {
    /// Validate `config` and resolve the home directory.
    pub fn new(config: WiringConfig) -> Result<Self> {
        config.validate()?;
        let home = config.home_dir()?;
        tracing::debug!(home = %home.display(), namespace = %config.namespace, "wiring engine ready");
        Ok(Self { config, home })
    }

    pub fn home(&self) -> &std::path::Path {
        &self.home
    }

    /// Render one block body without touching any file.
    pub fn render(&self, kind: BlockKind, shell: Shell) -> Vec<String> {
        Renderer::new(&self.config, &self.home).render(kind, shell)
    }

    /// Marker pair for a block kind under this engine's namespace.
    pub fn block_spec(&self, kind: BlockKind) -> Result<BlockSpec> {
        Ok(BlockSpec::namespaced(&self.config.namespace, kind.name())?)
    }

    /// Every (document, block) pair this configuration manages.
    ///
    /// With `shell_hook = false` hook blocks stay in the plan, disabled, so
    /// that hooks installed by an earlier run get removed.
    pub fn plan(&self) -> Result<Vec<PlannedBlock>> {
        let renderer = Renderer::new(&self.config, &self.home);
        let mut plan = Vec::new();

        for target in self.config.targets() {
            let path = DocumentPath::resolve(&target.path, &self.home);
            for kind in &target.blocks {
                let enabled = *kind != BlockKind::Hook || self.config.shell_hook;
                plan.push(PlannedBlock {
                    path: path.clone(),
                    shell: target.shell,
                    kind: *kind,
                    spec: self.block_spec(*kind)?,
                    body: if enabled {
                        renderer.render(*kind, target.shell)
                    } else {
                        Vec::new()
                    },
                    enabled,
                });
            }
        }
        Ok(plan)
    }

    /// Install or refresh every enabled block and remove disabled ones.
    ///
    /// A failure on one document is recorded in the report; that document's
    /// remaining blocks are skipped and the other documents still processed.
    pub fn apply(&self, options: WiringOptions) -> Result<WiringReport> {
        let mut patcher = self.patcher(options)?;
        let mut report = WiringReport::new(options.dry_run);
        let mut failed = HashSet::new();

        for planned in self.plan()? {
            if failed.contains(&planned.path) {
                continue;
            }
            let result = if planned.enabled {
                patcher.patch(&planned.path, &planned.spec, &planned.body)
            } else {
                patcher.remove(&planned.path, &planned.spec)
            };
            if !report.record(result) {
                failed.insert(planned.path);
            }
        }

        tracing::info!(
            changed = report.changes().count(),
            errors = report.errors.len(),
            dry_run = options.dry_run,
            "wiring finished"
        );
        Ok(report)
    }

    /// Remove every planned block, keeping the rest of each document.
    pub fn unwire(&self, options: WiringOptions) -> Result<WiringReport> {
        let mut patcher = self.patcher(options)?;
        let mut report = WiringReport::new(options.dry_run);
        let mut failed = HashSet::new();

        for planned in self.plan()? {
            if failed.contains(&planned.path) {
                continue;
            }
            if !report.record(patcher.remove(&planned.path, &planned.spec)) {
                failed.insert(planned.path);
            }
        }
        Ok(report)
    }

    /// Report the on-disk state of every planned block.
    ///
    /// A disabled block is up to date when it is absent.
    pub fn status(&self) -> Result<Vec<BlockState>> {
        let patcher = self.patcher(WiringOptions { dry_run: true })?;
        let mut states = Vec::new();

        for planned in self.plan()? {
            let status = patcher.inspect(&planned.path, &planned.spec)?;
            let up_to_date = if planned.enabled {
                matches!(&status, BlockStatus::Present { body } if *body == planned.body)
            } else {
                status == BlockStatus::Absent
            };
            states.push(BlockState {
                path: planned.path.to_path_buf(),
                shell: planned.shell,
                block: planned.kind,
                status,
                up_to_date,
            });
        }
        Ok(states)
    }

    fn patcher(&self, options: WiringOptions) -> Result<MarkedBlockPatcher> {
        Ok(MarkedBlockPatcher::new(&self.config.namespace)?.with_dry_run(options.dry_run))
    }
}
