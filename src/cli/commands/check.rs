//! check command - Validate branch names and commit messages
//!
//! Every check is recorded in the audit trail, whatever its outcome.
//! A failure to record is reported as a warning and does not change the
//! result of the check.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::{Context, Outcome};
use crate::core::audit::{AuditEvent, AuditLogger, AuditStatus};
use crate::core::policy::{PolicyEnforcer, PolicyViolation};
use crate::ui::output;

/// Validate a candidate branch name.
pub fn check_branch(ctx: &Context, name: &str) -> Result<Outcome> {
    let config = ctx.load_config()?;
    let enforcer = PolicyEnforcer::new(&config);

    let result = enforcer.validate_branch_name(name);

    let event = AuditEvent::new("check-branch", format!("Validate branch name {}", name))
        .detail("branch", name);
    record(ctx, event, result.as_ref().err());

    Ok(report(
        ctx,
        result,
        format!("Branch name '{}' satisfies policy", name),
    ))
}

/// Validate a commit message given inline or read from `file`.
pub fn check_commit(
    ctx: &Context,
    message: Option<&str>,
    file: Option<&Path>,
) -> Result<Outcome> {
    let message = match (message, file) {
        (Some(message), _) => message.to_string(),
        (None, Some(file)) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read commit message from {}", file.display()))?,
        (None, None) => anyhow::bail!("Provide a commit message or --file"),
    };

    let config = ctx.load_config()?;
    let enforcer = PolicyEnforcer::new(&config);

    let result = enforcer.validate_commit_message(&message);

    let subject = message.split('\n').next().unwrap_or_default();
    let event =
        AuditEvent::new("check-commit", "Validate commit message").detail("subject", subject);
    record(ctx, event, result.as_ref().err());

    Ok(report(ctx, result, "Commit message satisfies policy"))
}

/// Print the outcome of a check.
fn report(
    ctx: &Context,
    result: Result<(), PolicyViolation>,
    ok_message: impl std::fmt::Display,
) -> Outcome {
    match result {
        Ok(()) => {
            output::success(ok_message, ctx.verbosity);
            Outcome::Passed
        }
        Err(violation) => {
            output::rejected(&violation);
            Outcome::Rejected
        }
    }
}

/// Append an audit entry for a check.
///
/// Skipped outside a git repository so that no `.git` is created.
fn record(ctx: &Context, event: AuditEvent, violation: Option<&PolicyViolation>) {
    if !ctx.paths.is_git_repo() {
        output::debug("Not a git repository, skipping audit", ctx.verbosity);
        return;
    }

    // A dry run never counts as a failure; the violation stays in details.
    let event = match (violation, ctx.dry_run) {
        (Some(violation), true) => event
            .detail("rule", violation.kind().as_str())
            .detail("violation", violation.to_string())
            .status(AuditStatus::DryRun),
        (Some(violation), false) => event
            .detail("rule", violation.kind().as_str())
            .status(AuditStatus::Failure)
            .error(violation.to_string()),
        (None, true) => event.status(AuditStatus::DryRun),
        (None, false) => event,
    };

    let written = AuditLogger::open(Some(ctx.paths.root())).and_then(|logger| logger.log(event));
    match written {
        Ok(entry) => output::debug(
            format!("Recorded {} ({})", entry.command, entry.status),
            ctx.verbosity,
        ),
        Err(e) => output::warn(format!("failed to record audit entry: {}", e), ctx.verbosity),
    }
}
