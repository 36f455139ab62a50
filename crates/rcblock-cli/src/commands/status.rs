//! Status command implementation

use colored::Colorize;
use rcblock_blocks::BlockStatus;

use super::engine;
use crate::cli::Settings;
use crate::error::Result;

/// Run the status command
///
/// Reports, for every configured block, whether it is present and current.
pub fn run_status(settings: &Settings, json: bool) -> Result<()> {
    let engine = engine(settings)?;
    let states = engine.status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&states)?);
        return Ok(());
    }

    let mut healthy = true;
    for state in &states {
        let label = match &state.status {
            _ if state.up_to_date => "OK".green().bold(),
            BlockStatus::Absent => "MISSING".yellow().bold(),
            BlockStatus::Present { .. } => "STALE".yellow().bold(),
            BlockStatus::Duplicated { .. } => "DUPLICATE".yellow().bold(),
            BlockStatus::Partial { .. } => "PARTIAL".red().bold(),
        };
        healthy &= state.up_to_date;

        let detail = match &state.status {
            BlockStatus::Duplicated { copies } => format!(" ({copies} copies)"),
            BlockStatus::Partial { starts, ends } => {
                format!(" ({starts} start / {ends} end markers, fix by hand)")
            }
            _ => String::new(),
        };
        println!(
            "{:>9} {} [{}]{}",
            label,
            state.path.display().to_string().cyan(),
            state.block,
            detail.dimmed()
        );
    }

    if !healthy {
        println!();
        println!("Run {} to repair.", "rcblock wire".cyan());
    }
    Ok(())
}
