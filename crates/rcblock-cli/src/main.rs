//! rcblock CLI
//!
//! Keeps managed blocks in shell startup files up to date.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.settings),
        None => {
            println!("{} shell startup file wiring", "rcblock".green().bold());
            println!();
            println!("Run {} for available commands.", "rcblock --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, settings: &cli::Settings) -> Result<()> {
    match cmd {
        Commands::Patch {
            file,
            start,
            end,
            lines,
            from,
            name,
            dry_run,
            json,
        } => commands::run_patch(
            settings,
            commands::PatchArgs {
                file,
                start,
                end,
                lines,
                from,
                name,
                dry_run,
                json,
            },
        ),
        Commands::Wire { dry_run, json } => commands::run_wire(settings, dry_run, json),
        Commands::Unwire { dry_run, json } => commands::run_unwire(settings, dry_run, json),
        Commands::Status { json } => commands::run_status(settings, json),
        Commands::Render { block, shell } => commands::run_render(settings, &block, &shell),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}
