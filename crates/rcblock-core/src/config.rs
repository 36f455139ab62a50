//! Wiring configuration
//!
//! Everything the installer scripts used to read from ambient environment
//! variables (`MAMBA_ROOT_PREFIX`, `MAMBA_EXE`, extra `PATH` entries) lives in
//! [`WiringConfig`] and is passed explicitly to the renderer and the engine.
//!
//! ```toml
//! namespace = "rcblock"
//! mamba_root_prefix = "~/micromamba"
//! mamba_exe = "~/.local/bin/micromamba"
//! bin_dirs = ["~/.local/bin"]
//! shell_hook = true
//! activate = "base"
//!
//! [env]
//! PIP_NO_CACHE_DIR = "1"
//!
//! [[targets]]
//! path = "~/.bashrc"
//! shell = "bash"
//! blocks = ["env", "hook"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rcblock_fs::{ConfigStore, validate_identifier};
use serde::{Deserialize, Serialize};

use crate::{BlockKind, Error, Result, Shell};

pub const DEFAULT_NAMESPACE: &str = "rcblock";

/// One startup file and the blocks it should carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Path, `~`-relative paths are resolved against the home directory.
    pub path: String,
    pub shell: Shell,
    #[serde(default = "default_blocks")]
    pub blocks: Vec<BlockKind>,
}

fn default_blocks() -> Vec<BlockKind> {
    vec![BlockKind::Env]
}

impl TargetConfig {
    pub fn new(path: impl Into<String>, shell: Shell, blocks: &[BlockKind]) -> Self {
        Self {
            path: path.into(),
            shell,
            blocks: blocks.to_vec(),
        }
    }
}

/// Configuration for wiring the user's shell startup files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WiringConfig {
    /// Marker and backup namespace.
    pub namespace: String,
    /// Home directory; detected when unset.
    pub home: Option<PathBuf>,
    pub mamba_root_prefix: String,
    pub mamba_exe: String,
    /// Directories prepended to `PATH`, in order.
    pub bin_dirs: Vec<String>,
    /// Extra exports. Values are double-quoted; `$` is left for the shell.
    pub env: BTreeMap<String, String>,
    /// Install the micromamba shell hook; `false` skips every hook block.
    pub shell_hook: bool,
    /// Environment activated by the hook block.
    pub activate: Option<String>,
    /// Env file sourced by non-interactive bash through `BASH_ENV`.
    pub env_file: String,
    /// Export `BASH_ENV` from bash targets.
    pub bash_env: bool,
    /// Startup files to wire; the defaults cover bash, zsh and POSIX sh.
    pub targets: Option<Vec<TargetConfig>>,
}

impl Default for WiringConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            home: None,
            mamba_root_prefix: "~/micromamba".to_string(),
            mamba_exe: "~/.local/bin/micromamba".to_string(),
            bin_dirs: vec!["~/.local/bin".to_string()],
            env: BTreeMap::new(),
            shell_hook: true,
            activate: None,
            env_file: "~/.rcblock_env".to_string(),
            bash_env: true,
            targets: None,
        }
    }
}

impl WiringConfig {
    /// Load from a TOML, JSON or YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        ConfigStore::new()
            .load_optional(path)?
            .ok_or_else(|| Error::ConfigNotFound {
                path: path.to_path_buf(),
            })
    }

    /// Targets to wire, falling back to the default set.
    pub fn targets(&self) -> Vec<TargetConfig> {
        match &self.targets {
            Some(targets) => targets.clone(),
            None => self.default_targets(),
        }
    }

    fn default_targets(&self) -> Vec<TargetConfig> {
        let interactive = &[BlockKind::Env, BlockKind::Hook];
        vec![
            TargetConfig::new("~/.bashrc", Shell::Bash, interactive),
            TargetConfig::new("~/.zshrc", Shell::Zsh, interactive),
            TargetConfig::new("~/.profile", Shell::Posix, &[BlockKind::Env]),
            TargetConfig::new(self.env_file.clone(), Shell::Posix, &[BlockKind::Env]),
        ]
    }

    /// Home directory from the config, or the platform's.
    pub fn home_dir(&self) -> Result<PathBuf> {
        self.home.clone().or_else(dirs::home_dir).ok_or(Error::NoHome)
    }

    /// Check the configuration for inconsistencies.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.namespace, "namespace")?;

        for name in self.env.keys() {
            if !is_shell_identifier(name) {
                return Err(Error::config(format!(
                    "'{name}' is not a valid environment variable name"
                )));
            }
        }
        for (field, value) in [
            ("mamba_root_prefix", &self.mamba_root_prefix),
            ("mamba_exe", &self.mamba_exe),
            ("env_file", &self.env_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{field} must not be empty")));
            }
        }
        // Written unquoted after `micromamba activate`
        if let Some(env) = &self.activate {
            validate_identifier(env, "activate")?;
        }

        let targets = self.targets();
        if targets.is_empty() {
            return Err(Error::config("no targets to wire"));
        }
        for target in &targets {
            if target.path.trim().is_empty() {
                return Err(Error::config("target path must not be empty"));
            }
            for kind in &target.blocks {
                if !target.shell.supports(*kind) {
                    return Err(Error::config(format!(
                        "{} targets cannot carry a {} block ({})",
                        target.shell, kind, target.path
                    )));
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
