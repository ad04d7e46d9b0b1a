//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! Rejections and errors always go to stderr.

use std::fmt::Display;

use crate::core::audit::AuditEntry;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a policy rejection (always shown).
pub fn rejected(message: impl Display) {
    eprintln!("rejected: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format one audit entry as a single history line.
///
/// `<timestamp>  <status>  <command>  <action> (<user>)[: <error>]`
pub fn format_entry(entry: &AuditEntry) -> String {
    let mut line = format!(
        "{}  {:<8} {:<13} {} ({})",
        entry.timestamp, entry.status, entry.command, entry.action, entry.user
    );
    if let Some(error) = &entry.error {
        line.push_str(": ");
        line.push_str(error);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audit::AuditStatus;
    use crate::core::types::UtcTimestamp;

    fn entry(error: Option<&str>) -> AuditEntry {
        let dt = chrono::DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        AuditEntry {
            timestamp: UtcTimestamp::from_datetime(dt),
            command: "check-branch".to_string(),
            action: "Validate branch name x".to_string(),
            status: if error.is_some() {
                AuditStatus::Failure
            } else {
                AuditStatus::Success
            },
            user: "alice".to_string(),
            details: Default::default(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn entry_line_without_error() {
        let line = format_entry(&entry(None));
        assert!(line.starts_with("2024-03-01T12:00:00+00:00"));
        assert!(line.contains("success"));
        assert!(line.ends_with("Validate branch name x (alice)"));
    }

    #[test]
    fn entry_line_with_error() {
        let line = format_entry(&entry(Some("protected")));
        assert!(line.contains("failure"));
        assert!(line.ends_with("(alice): protected"));
    }
}
