//! history command - Display the audit trail
//!
//! Entries are printed oldest-first. Outside a git repository there is
//! no audit trail, and nothing is created.

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::audit::{AuditEntry, AuditLogger};
use crate::ui::output;

/// Show audit entries, optionally only the last `limit`.
pub fn history(ctx: &Context, limit: Option<usize>, json: bool) -> Result<()> {
    let entries: Vec<AuditEntry> = if ctx.paths.is_git_repo() {
        let logger = AuditLogger::open(Some(ctx.paths.root()))
            .context("Failed to open audit log")?;
        output::debug(
            format!("Reading {}", logger.log_path().display()),
            ctx.verbosity,
        );
        logger.read_logs(limit).context("Failed to read audit log")?
    } else {
        output::debug("Not a git repository, no audit log", ctx.verbosity);
        Vec::new()
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&entries).context("Failed to render audit entries")?;
        println!("{}", rendered);
        return Ok(());
    }

    if entries.is_empty() {
        output::print("No audit entries recorded", ctx.verbosity);
        return Ok(());
    }

    for entry in &entries {
        println!("{}", output::format_entry(entry));
    }

    Ok(())
}
