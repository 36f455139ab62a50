//! Render command implementation
//!
//! Prints a block exactly as `wire` would install it.

use rcblock_core::{BlockKind, Shell};

use super::engine;
use crate::cli::Settings;
use crate::error::{CliError, Result};

pub fn run_render(settings: &Settings, block: &str, shell: &str) -> Result<()> {
    let kind: BlockKind = block.parse()?;
    let shell: Shell = shell.parse()?;
    if !shell.supports(kind) {
        return Err(CliError::user(format!(
            "{shell} startup files do not take a {kind} block"
        )));
    }

    let engine = engine(settings)?;
    let spec = engine.block_spec(kind)?;
    for line in spec.render(&engine.render(kind, shell)) {
        println!("{line}");
    }
    Ok(())
}
