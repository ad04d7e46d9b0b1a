//! core::paths
//!
//! Centralized path routing for gwa storage locations.
//!
//! # Storage Layout
//!
//! Relative to the repository root:
//! - `.gwa.toml` - Workflow policy configuration
//!
//! Relative to the repository's common git directory:
//! - `gwa/` - Private gwa directory inside git metadata
//! - `gwa/audit.jsonl` - Append-only audit trail
//!
//! # Worktrees and Submodules
//!
//! `.git` is not always a directory. In linked worktrees and submodules it
//! is a file holding a `gitdir: <path>` pointer. A linked worktree's git
//! directory also carries a `commondir` file naming the directory shared by
//! every worktree of the repository. gwa data lives in that shared
//! directory, so all worktrees write one audit trail.
//!
//! No code outside this module should compute `.git/gwa` paths or assume
//! `.git` is a directory.
//!
//! # Example
//!
//! ```
//! use gwa_policy::core::paths::GwaPaths;
//! use std::path::PathBuf;
//!
//! let paths = GwaPaths::new("/repo");
//!
//! assert_eq!(paths.config_path(), PathBuf::from("/repo/.gwa.toml"));
//! assert_eq!(
//!     paths.audit_log_path(),
//!     PathBuf::from("/repo/.git/gwa/audit.jsonl")
//! );
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, relative to the repository root.
pub const CONFIG_FILE_NAME: &str = ".gwa.toml";

/// Name of the git metadata entry at the repository root.
const DOT_GIT: &str = ".git";

/// Name of the private directory under the common git directory.
const GWA_DIR_NAME: &str = "gwa";

/// Name of the audit log file under the private directory.
const AUDIT_LOG_NAME: &str = "audit.jsonl";

/// Path routing for a single repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GwaPaths {
    root: PathBuf,
}

impl GwaPaths {
    /// Create paths rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create paths rooted at the given directory, or the current
    /// working directory when `None`.
    ///
    /// The current directory is used as a relative `.` path if it
    /// cannot be resolved.
    pub fn resolve(root: Option<&Path>) -> Self {
        match root {
            Some(root) => Self::new(root),
            None => Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
        }
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The git directory for this working tree.
    ///
    /// `<root>/.git` when it is a directory (or missing). When `.git` is a
    /// `gitdir:` pointer file, the directory it names, resolved against
    /// the root if relative.
    pub fn git_dir(&self) -> PathBuf {
        let dot_git = self.root.join(DOT_GIT);
        if !dot_git.is_file() {
            return dot_git;
        }

        match read_gitdir_pointer(&dot_git) {
            Some(target) => self.root.join(target),
            None => {
                tracing::debug!(path = %dot_git.display(), "unreadable gitdir pointer");
                dot_git
            }
        }
    }

    /// The git directory shared by all worktrees of the repository.
    ///
    /// Equals [`git_dir`](Self::git_dir) unless the git directory has a
    /// `commondir` file.
    pub fn common_dir(&self) -> PathBuf {
        let git_dir = self.git_dir();
        match fs::read_to_string(git_dir.join("commondir")) {
            Ok(contents) if !contents.trim().is_empty() => git_dir.join(contents.trim()),
            _ => git_dir,
        }
    }

    /// Whether this is a linked worktree (common dir differs from git dir).
    pub fn is_linked_worktree(&self) -> bool {
        self.git_dir() != self.common_dir()
    }

    /// Whether the root looks like a git working tree.
    pub fn is_git_repo(&self) -> bool {
        self.git_dir().is_dir()
    }

    /// The repository policy file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// The private gwa directory.
    pub fn gwa_dir(&self) -> PathBuf {
        self.common_dir().join(GWA_DIR_NAME)
    }

    /// The audit trail file.
    pub fn audit_log_path(&self) -> PathBuf {
        self.gwa_dir().join(AUDIT_LOG_NAME)
    }
}

/// Read the target of a `gitdir: <path>` file.
fn read_gitdir_pointer(file: &Path) -> Option<PathBuf> {
    let contents = fs::read_to_string(file).ok()?;
    let target = contents.lines().next()?.strip_prefix("gitdir:")?.trim();
    (!target.is_empty()).then(|| PathBuf::from(target))
}
