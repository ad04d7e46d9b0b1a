//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Use this policy file instead of `.gwa.toml`
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--dry-run`: Record audit entries as `dry_run`

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gwa - Branch and commit policy checks with an audit trail
#[derive(Parser, Debug)]
#[command(name = "gwa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gwa was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Policy file to load instead of <root>/.gwa.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Mark audit entries as dry runs
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a branch name or commit message against policy
    #[command(
        name = "check",
        after_help = "\
WORKFLOW EXAMPLES:
    # Before creating a branch
    gwa check branch feature/login

    # From a commit-msg hook
    gwa check commit --file \"$1\""
    )]
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },

    /// Show the audit trail, oldest first
    #[command(name = "history")]
    History {
        /// Show only the most recent N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective policy configuration as TOML
    #[command(name = "config")]
    Config {
        /// Print built-in defaults instead of the loaded file
        #[arg(long)]
        defaults: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    gwa completion bash > ~/.local/share/bash-completion/completions/gwa

    # Zsh
    gwa completion zsh > \"${fpath[1]}/_gwa\"

    # Fish
    gwa completion fish > ~/.config/fish/completions/gwa.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// What `check` validates.
#[derive(Subcommand, Debug)]
pub enum CheckTarget {
    /// Validate a branch name
    Branch {
        /// Candidate branch name
        name: String,
    },

    /// Validate a commit message
    Commit {
        /// Commit message text
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        message: Option<String>,

        /// Read the commit message from a file
        #[arg(short = 'F', long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
