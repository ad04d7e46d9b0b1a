//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! [branch]
//! prefix_required = true
//! allowed_prefixes = ["feature", "bugfix", "hotfix"]
//! main_branch = "main"
//! protected_branches = ["main", "master"]
//!
//! [commit]
//! conventional_commits = true
//! allowed_types = ["feat", "fix", "docs"]
//! require_scope = false
//! max_subject_length = 72
//!
//! [pr]
//! require_description = true
//! auto_assign = false
//! draft_by_default = false
//! ```
//!
//! Every section and field is optional; missing ones take the defaults
//! shown by each type's `Default` impl.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::SubjectLength;

/// Root workflow policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Branch naming rules
    pub branch: BranchPolicy,

    /// Commit message rules
    pub commit: CommitPolicy,

    /// Pull request defaults
    pub pr: PrPolicy,
}

/// Branch naming and management policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BranchPolicy {
    /// Require new branches to start with `<prefix>/`
    pub prefix_required: bool,

    /// Accepted prefixes, in display order
    pub allowed_prefixes: Vec<String>,

    /// Name of the integration branch
    pub main_branch: String,

    /// Names that may never be used for a new branch
    pub protected_branches: Vec<String>,
}

impl Default for BranchPolicy {
    fn default() -> Self {
        Self {
            prefix_required: false,
            allowed_prefixes: strings(&["feature", "bugfix", "hotfix"]),
            main_branch: "main".to_string(),
            protected_branches: strings(&["main", "master"]),
        }
    }
}

/// Commit message policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommitPolicy {
    /// Enforce `type(scope): description` subjects
    pub conventional_commits: bool,

    /// Accepted commit types, in display order
    pub allowed_types: Vec<String>,

    /// Require the `(scope)` part
    pub require_scope: bool,

    /// Maximum subject length in characters
    pub max_subject_length: SubjectLength,
}

impl CommitPolicy {
    /// Default commit types.
    pub const DEFAULT_TYPES: &'static [&'static str] =
        &["feat", "fix", "docs", "style", "refactor", "test", "chore"];

    /// Build a default policy with a custom subject limit.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `max_subject_length` is below 10.
    pub fn with_max_subject_length(max_subject_length: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            max_subject_length: SubjectLength::new(max_subject_length)?,
            ..Default::default()
        })
    }
}

impl Default for CommitPolicy {
    fn default() -> Self {
        Self {
            conventional_commits: true,
            allowed_types: strings(Self::DEFAULT_TYPES),
            require_scope: false,
            max_subject_length: SubjectLength::default(),
        }
    }
}

/// Pull request policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrPolicy {
    /// Refuse to open a PR without a body
    pub require_description: bool,

    /// Assign the author automatically
    pub auto_assign: bool,

    /// Open PRs as drafts
    pub draft_by_default: bool,
}

impl Default for PrPolicy {
    fn default() -> Self {
        Self {
            require_description: true,
            auto_assign: false,
            draft_by_default: false,
        }
    }
}

/// Known keys per section, used to report ignored keys.
pub(crate) const KNOWN_KEYS: &[(&str, &[&str])] = &[
    (
        "branch",
        &[
            "prefix_required",
            "allowed_prefixes",
            "main_branch",
            "protected_branches",
        ],
    ),
    (
        "commit",
        &[
            "conventional_commits",
            "allowed_types",
            "require_scope",
            "max_subject_length",
        ],
    ),
    ("pr", &["require_description", "auto_assign", "draft_by_default"]),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
