//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// rcblock - Keep managed blocks in shell startup files up to date
#[derive(Parser, Debug)]
#[command(name = "rcblock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: Settings,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration knobs shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Wiring config file (TOML, JSON or YAML)
    #[arg(long, global = true, env = "RCBLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Home directory that holds the startup files
    #[arg(long, global = true, env = "RCBLOCK_HOME")]
    pub home: Option<PathBuf>,

    /// Namespace used in markers and backup names
    #[arg(long, global = true, env = "RCBLOCK_NAMESPACE")]
    pub namespace: Option<String>,

    /// micromamba root prefix
    #[arg(long, global = true, env = "MAMBA_ROOT_PREFIX")]
    pub mamba_root_prefix: Option<String>,

    /// micromamba executable
    #[arg(long, global = true, env = "MAMBA_EXE")]
    pub mamba_exe: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install or refresh one marked block in a file
    ///
    /// Examples:
    ///   rcblock patch ~/.bashrc --start '# >>> x >>>' --end '# <<< x <<<' -l 'export FOO=1'
    ///   rcblock patch ~/.profile --start '# >>> x >>>' --end '# <<< x <<<' --from body.sh --dry-run
    Patch {
        /// File to patch (created if missing)
        file: PathBuf,

        /// Literal start marker line
        #[arg(long)]
        start: String,

        /// Literal end marker line
        #[arg(long)]
        end: String,

        /// Body line (repeatable)
        #[arg(short, long = "line", conflicts_with = "from")]
        lines: Vec<String>,

        /// Read the body from a file
        #[arg(long)]
        from: Option<PathBuf>,

        /// Block name used in messages
        #[arg(long, default_value = "block")]
        name: String,

        /// Preview changes without applying them
        #[arg(long, env = "RCBLOCK_DRY_RUN", value_parser = BoolishValueParser::new())]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Wire every configured startup file
    Wire {
        /// Preview changes without applying them
        #[arg(long, env = "RCBLOCK_DRY_RUN", value_parser = BoolishValueParser::new())]
        dry_run: bool,

        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Remove every managed block from the configured startup files
    Unwire {
        /// Preview changes without applying them
        #[arg(long, env = "RCBLOCK_DRY_RUN", value_parser = BoolishValueParser::new())]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the state of every managed block
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print a block as it would be installed
    Render {
        /// Block kind (env or hook)
        block: String,

        /// Shell dialect (bash, zsh or posix)
        #[arg(short, long, default_value = "bash")]
        shell: String,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   rcblock completions bash > ~/.local/share/bash-completion/completions/rcblock
    ///   rcblock completions zsh > ~/.zfunc/_rcblock
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}
