//! Wire and unwire command implementations

use colored::Colorize;
use rcblock_core::{WiringOptions, WiringReport};

use super::engine;
use super::patch::print_outcome;
use crate::cli::Settings;
use crate::error::{CliError, Result};

/// Run the wire command
///
/// Installs or refreshes every configured block.
pub fn run_wire(settings: &Settings, dry_run: bool, json: bool) -> Result<()> {
    let engine = engine(settings)?;
    if !json {
        println!(
            "{} Wiring startup files in {}{}",
            "=>".blue().bold(),
            engine.home().display().to_string().yellow(),
            if dry_run { " (dry run)" } else { "" }
        );
    }

    let report = engine.apply(WiringOptions { dry_run })?;
    finish(report, json, "wired")
}

/// Run the unwire command
///
/// Removes every configured block and leaves the rest of each file alone.
pub fn run_unwire(settings: &Settings, dry_run: bool, json: bool) -> Result<()> {
    let engine = engine(settings)?;
    if !json {
        println!(
            "{} Removing managed blocks from {}{}",
            "=>".blue().bold(),
            engine.home().display().to_string().yellow(),
            if dry_run { " (dry run)" } else { "" }
        );
    }

    let report = engine.unwire(WiringOptions { dry_run })?;
    finish(report, json, "unwired")
}

fn finish(report: WiringReport, json: bool, verb: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &report.outcomes {
            print_outcome(outcome);
        }
        for error in &report.errors {
            println!("{:>6} {}", "FAIL".red().bold(), error);
        }
        if report.success && !report.has_changes() {
            println!("{} Nothing to do.", "OK".green().bold());
        }
    }

    if report.success {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} document(s) could not be {verb}",
            report.errors.len()
        )))
    }
}
