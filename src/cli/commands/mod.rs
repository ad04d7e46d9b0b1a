//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Consults the policy core or the audit trail
//! 3. Formats and displays output
//!
//! Handlers never run git.

mod check;
mod completion;
mod config_cmd;
mod history;

// Re-export command functions for testing and direct invocation
pub use check::{check_branch, check_commit};
pub use completion::completion;
pub use config_cmd::show as config_show;
pub use history::history;

use anyhow::Result;

use super::args::{CheckTarget, Command};
use super::{Context, Outcome};

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<Outcome> {
    match command {
        Command::Check { target } => match target {
            CheckTarget::Branch { name } => check_branch(ctx, &name),
            CheckTarget::Commit { message, file } => {
                check_commit(ctx, message.as_deref(), file.as_deref())
            }
        },
        Command::History { limit, json } => history(ctx, limit, json).map(|()| Outcome::Passed),
        Command::Config { defaults } => config_show(ctx, defaults).map(|()| Outcome::Passed),
        Command::Completion { shell } => completion(shell).map(|()| Outcome::Passed),
    }
}
