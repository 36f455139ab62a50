//! Patch command implementation
//!
//! Installs one arbitrary marked block, the building block `wire` uses for
//! every startup file.

use std::path::PathBuf;

use colored::Colorize;
use rcblock_blocks::diff::line_stats;
use rcblock_blocks::{BlockSpec, MarkedBlockPatcher, PatchAction, PatchOutcome};
use rcblock_fs::{DocumentPath, io};

use super::load_config;
use crate::cli::Settings;
use crate::error::Result;

/// Arguments of `rcblock patch`
#[derive(Debug, Clone)]
pub struct PatchArgs {
    pub file: PathBuf,
    pub start: String,
    pub end: String,
    pub lines: Vec<String>,
    pub from: Option<PathBuf>,
    pub name: String,
    pub dry_run: bool,
    pub json: bool,
}

/// Run the patch command
pub fn run_patch(settings: &Settings, args: PatchArgs) -> Result<()> {
    let namespace = load_config(settings)?.namespace;
    let body: Vec<String> = match &args.from {
        Some(path) => io::read_text(path)?.lines().map(str::to_string).collect(),
        None => args.lines,
    };

    let spec = BlockSpec::new(args.name, args.start, args.end)?;
    let path = DocumentPath::new(&args.file);
    let mut patcher = MarkedBlockPatcher::new(&namespace)?.with_dry_run(args.dry_run);

    let outcome = patcher.patch(&path, &spec, &body)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

/// Print one outcome line, plus a diff for dry-run changes.
pub(crate) fn print_outcome(outcome: &PatchOutcome) {
    let label = match outcome.action {
        PatchAction::AlreadyConfigured => "OK".green().bold(),
        PatchAction::NotPresent => "SKIP".dimmed(),
        _ if outcome.dry_run => "WOULD".yellow().bold(),
        _ => "DONE".green().bold(),
    };
    println!("{:>6} {}", label, outcome.describe());

    if outcome.dry_run && outcome.changed() {
        print_diff(&outcome.unified_diff());
        let (added, removed) = line_stats(&outcome.before, &outcome.after);
        println!(
            "       {} {} lines",
            format!("+{added}").green(),
            format!("-{removed}").red()
        );
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("       {}", line.bold());
        } else if line.starts_with('+') {
            println!("       {}", line.green());
        } else if line.starts_with('-') {
            println!("       {}", line.red());
        } else if line.starts_with("@@") {
            println!("       {}", line.cyan());
        } else {
            println!("       {}", line);
        }
    }
}
