//! Command implementations for rcblock-cli

pub mod completions;
pub mod patch;
pub mod render;
pub mod status;
pub mod wire;

pub use completions::run_completions;
pub use patch::{PatchArgs, run_patch};
pub use render::run_render;
pub use status::run_status;
pub use wire::{run_unwire, run_wire};

use rcblock_core::{WiringConfig, WiringEngine};

use crate::cli::Settings;
use crate::error::Result;

/// Load the wiring config and apply command-line overrides.
///
/// An explicitly named config file must exist; without one the defaults are
/// used.
pub fn load_config(settings: &Settings) -> Result<WiringConfig> {
    let mut config = match &settings.config {
        Some(path) => WiringConfig::load(path)?,
        None => WiringConfig::default(),
    };

    if let Some(home) = &settings.home {
        config.home = Some(home.clone());
    }
    if let Some(namespace) = &settings.namespace {
        config.namespace = namespace.clone();
    }
    if let Some(prefix) = &settings.mamba_root_prefix {
        config.mamba_root_prefix = prefix.clone();
    }
    if let Some(exe) = &settings.mamba_exe {
        config.mamba_exe = exe.clone();
    }
    Ok(config)
}

/// Build a wiring engine from the settings.
pub fn engine(settings: &Settings) -> Result<WiringEngine> {
    Ok(WiringEngine::new(load_config(settings)?)?)
}
