//! core::audit
//!
//! Append-only audit trail of workflow actions.
//!
//! # Storage
//!
//! - `<common git dir>/gwa/audit.jsonl` - one JSON object per line, UTF-8
//!
//! For an ordinary repository that is `<root>/.git/gwa/audit.jsonl`. Linked
//! worktrees share the main repository's log; see [`GwaPaths`].
//!
//! # Guarantees
//!
//! - Each [`AuditLogger::log`] call appends exactly one newline-terminated
//!   record using a single write on an append-mode handle
//! - Existing content is never truncated, rewritten or compacted
//! - [`AuditLogger::read_logs`] returns records oldest-first
//!
//! There is no cross-process locking. Concurrent writers interleave at
//! the granularity of the platform's append-mode writes.
//!
//! # Example
//!
//! ```no_run
//! use gwa_policy::core::audit::{AuditEvent, AuditLogger, AuditStatus};
//! use std::path::Path;
//!
//! let logger = AuditLogger::open(Some(Path::new("/path/to/repo")))?;
//!
//! logger.log(AuditEvent::new("start", "Created branch feature/login")
//!     .detail("branch", "feature/login"))?;
//! logger.log(AuditEvent::new("sync", "Failed to sync")
//!     .status(AuditStatus::Failure)
//!     .error("Remote not found"))?;
//!
//! for entry in logger.read_logs(Some(10))? {
//!     println!("{} {} {}", entry.timestamp, entry.command, entry.status);
//! }
//! # Ok::<(), gwa_policy::core::audit::AuditError>(())
//! ```

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::paths::GwaPaths;
use crate::core::types::UtcTimestamp;

/// Errors from audit log operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The log directory could not be created.
    #[error("failed to create audit directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Appending to the log failed.
    #[error("failed to write audit log '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading the log failed.
    #[error("failed to read audit log '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line in the log is not a valid entry.
    #[error("malformed audit log entry at line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    /// An entry could not be serialized.
    #[error("failed to serialize audit entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    Success,
    Failure,
    DryRun,
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditStatus::Success => "success",
            AuditStatus::Failure => "failure",
            AuditStatus::DryRun => "dry_run",
        };
        f.pad(s)
    }
}

/// One recorded action, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the action was logged.
    pub timestamp: UtcTimestamp,
    /// Short command verb, e.g. "start" or "commit".
    pub command: String,
    /// Free-text description of what was attempted.
    pub action: String,
    /// Outcome.
    pub status: AuditStatus,
    /// Who ran the command.
    pub user: String,
    /// Caller-supplied context.
    #[serde(default)]
    pub details: Map<String, Value>,
    /// Error message, present only when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An action to record, built by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    command: String,
    action: String,
    status: AuditStatus,
    details: Map<String, Value>,
    error: Option<String>,
}

impl AuditEvent {
    /// A successful action with no details.
    pub fn new(command: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            action: action.into(),
            status: AuditStatus::Success,
            details: Map::new(),
            error: None,
        }
    }

    /// Set the outcome.
    pub fn status(mut self, status: AuditStatus) -> Self {
        self.status = status;
        self
    }

    /// Add one detail.
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Merge a map of details.
    pub fn details(mut self, details: Map<String, Value>) -> Self {
        self.details.extend(details);
        self
    }

    /// Attach an error message. Empty messages are dropped.
    pub fn error(mut self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.error = (!error.is_empty()).then_some(error);
        self
    }
}

/// Source of environment variables.
///
/// Lets tests supply a fixed environment instead of the process one.
pub trait EnvSource {
    /// Look up a variable. `None` if unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Resolve the acting user.
///
/// Checks the platform's primary variable first (`USERNAME` on Windows,
/// `USER` elsewhere), then the other one. Empty values count as unset.
/// Falls back to `"unknown"`.
pub fn resolve_user(env: &impl EnvSource) -> String {
    let order: [&str; 2] = if cfg!(windows) {
        ["USERNAME", "USER"]
    } else {
        ["USER", "USERNAME"]
    };

    order
        .iter()
        .filter_map(|key| env.var(key))
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Writer and reader for a repository's audit trail.
#[derive(Debug, Clone)]
pub struct AuditLogger<E = ProcessEnv> {
    log_file: PathBuf,
    env: E,
}

impl AuditLogger<ProcessEnv> {
    /// Open the audit log for `repo_root` (the current directory if `None`),
    /// resolving users from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::CreateDir` if the log directory cannot be created.
    pub fn open(repo_root: Option<&Path>) -> Result<Self, AuditError> {
        Self::with_env(repo_root, ProcessEnv)
    }
}

impl<E: EnvSource> AuditLogger<E> {
    /// Open the audit log for `repo_root`, resolving users from `env`.
    ///
    /// Creates the gwa directory under the common git directory (and
    /// parents) if missing.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::CreateDir` if the log directory cannot be created.
    pub fn with_env(repo_root: Option<&Path>, env: E) -> Result<Self, AuditError> {
        let paths = GwaPaths::resolve(repo_root);
        let log_dir = paths.gwa_dir();
        fs::create_dir_all(&log_dir).map_err(|e| AuditError::CreateDir {
            path: log_dir.clone(),
            source: e,
        })?;

        Ok(Self {
            log_file: paths.audit_log_path(),
            env,
        })
    }

    /// Path of the log file.
    pub fn log_path(&self) -> &Path {
        &self.log_file
    }

    /// Append one entry for `event`, stamped with the current time and user.
    ///
    /// Returns the entry as written.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Write` if the append fails.
    pub fn log(&self, event: AuditEvent) -> Result<AuditEntry, AuditError> {
        let entry = AuditEntry {
            timestamp: UtcTimestamp::now(),
            command: event.command,
            action: event.action,
            status: event.status,
            user: resolve_user(&self.env),
            details: event.details,
            error: event.error,
        };

        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let write_err = |e: std::io::Error| AuditError::Write {
            path: self.log_file.clone(),
            source: e,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .map_err(write_err)?;
        file.write_all(line.as_bytes()).map_err(write_err)?;
        file.sync_data().map_err(write_err)?;

        tracing::debug!(
            path = %self.log_file.display(),
            command = %entry.command,
            status = %entry.status,
            "appended audit entry"
        );

        Ok(entry)
    }

    /// Read entries oldest-first.
    ///
    /// With `limit`, only the last `limit` entries are returned, still
    /// oldest-first. A missing log file yields no entries. Blank lines are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Read` if the file cannot be read and
    /// `AuditError::Parse` if any line is not a valid entry.
    pub fn read_logs(&self, limit: Option<usize>) -> Result<Vec<AuditEntry>, AuditError> {
        if !self.log_file.exists() {
            tracing::debug!(path = %self.log_file.display(), "no audit log yet");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.log_file).map_err(|e| AuditError::Read {
            path: self.log_file.clone(),
            source: e,
        })?;

        let mut entries = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str::<AuditEntry>(line).map_err(|e| AuditError::Parse {
                    line: idx + 1,
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(limit) = limit {
            let skip = entries.len().saturating_sub(limit);
            entries = entries.split_off(skip);
        }

        tracing::debug!(
            path = %self.log_file.display(),
            count = entries.len(),
            "read audit log"
        );

        Ok(entries)
    }
}
