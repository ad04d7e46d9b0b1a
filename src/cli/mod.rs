//! cli
//!
//! Command-line interface layer for gwa.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load policy configuration and dispatch to command handlers
//! - Does NOT run git; it only consults the policy core and the audit trail
//!
//! # Exit Status
//!
//! - `0` when the command succeeds and any checked input satisfies policy
//! - `1` when input is rejected by policy, or on any error

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::paths::GwaPaths;
use crate::ui::output::{self, Verbosity};

/// Whether checked input passed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command finished and nothing was rejected.
    Passed,
    /// Input was rejected by policy.
    Rejected,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Rejected => ExitCode::FAILURE,
        }
    }
}

/// Per-invocation settings derived from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Repository path routing.
    pub paths: GwaPaths,
    /// Explicit policy file, if given.
    pub config_path: Option<PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Record audit entries as dry runs.
    pub dry_run: bool,
}

impl Context {
    /// Build a context from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            paths: GwaPaths::resolve(cli.cwd.as_deref()),
            config_path: cli.config.clone(),
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
            dry_run: cli.dry_run,
        }
    }

    /// Load the policy configuration for this invocation.
    ///
    /// Uses `--config` if given, otherwise `<root>/.gwa.toml`.
    pub fn load_config(&self) -> Result<Config> {
        let path = self
            .config_path
            .clone()
            .unwrap_or_else(|| self.paths.config_path());

        let result = Config::load(Some(&path)).context("Failed to load policy configuration")?;
        match (&result.loaded_from, &self.config_path) {
            (Some(from), _) => output::debug(format!("Loaded config from {}", from.display()), self.verbosity),
            (None, Some(explicit)) => output::warn(
                format!("Config file {} not found, using defaults", explicit.display()),
                self.verbosity,
            ),
            (None, None) => output::debug("No config file found, using defaults", self.verbosity),
        }

        Ok(result.config)
    }
}

/// Default tracing level for the given verbosity.
fn tracing_level(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Debug => "debug",
        Verbosity::Quiet | Verbosity::Normal => "warn",
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` overrides the level chosen from flags.
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_level(verbosity)));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<Outcome> {
    let cli = Cli::parse_args();
    let ctx = Context::from_cli(&cli);
    init_tracing(ctx.verbosity);

    commands::dispatch(cli.command, &ctx)
}
