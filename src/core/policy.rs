//! core::policy
//!
//! Branch name and commit message policy enforcement.
//!
//! # Rules
//!
//! Branch names:
//! 1. A protected name is always rejected, even if it carries a valid prefix
//! 2. With `prefix_required`, the name must start with `<prefix>/` for one
//!    of `allowed_prefixes`
//!
//! Commit messages (subject = first line):
//! 1. The subject may not exceed `max_subject_length` characters
//! 2. With `conventional_commits`, the subject must be
//!    `type(scope): text` or `type: text`, where `type` is allowed and the
//!    scope is present if `require_scope` is set
//!
//! Length is checked before format. With `prefix_required` and an empty
//! `allowed_prefixes`, every non-protected name is rejected.
//!
//! # Example
//!
//! ```
//! use gwa_policy::core::config::Config;
//! use gwa_policy::core::policy::{PolicyEnforcer, ViolationKind};
//!
//! let mut config = Config::default();
//! config.branch.prefix_required = true;
//!
//! let enforcer = PolicyEnforcer::new(&config);
//! assert!(enforcer.validate_branch_name("feature/login").is_ok());
//!
//! let violation = enforcer.validate_branch_name("login").unwrap_err();
//! assert_eq!(violation.kind(), ViolationKind::MissingPrefix);
//! ```

use thiserror::Error;

use crate::core::config::Config;
use crate::core::conventional;

/// Why a subject failed the conventional commits check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatIssue {
    /// Not shaped like `type(scope): text`.
    Malformed,
    /// Shaped correctly, but the type is not allowed.
    UnknownType(String),
    /// Shaped correctly, but the required scope is absent.
    MissingScope,
}

/// A rejected branch name or commit message.
///
/// Carries the structured facts of the rejection; `Display` renders the
/// message shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Cannot create branch with protected name: {branch}")]
    ProtectedBranch { branch: String },

    #[error("Branch name must start with one of: {}", .allowed_prefixes.join(", "))]
    MissingPrefix {
        branch: String,
        allowed_prefixes: Vec<String>,
    },

    #[error("Commit subject exceeds {limit} characters")]
    SubjectTooLong { length: usize, limit: usize },

    #[error(
        "Commit message must follow conventional commits format. Allowed types: {}",
        .allowed_types.join(", ")
    )]
    InvalidFormat {
        subject: String,
        allowed_types: Vec<String>,
        issue: FormatIssue,
    },
}

/// Which rule a [`PolicyViolation`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    ProtectedBranch,
    MissingPrefix,
    SubjectTooLong,
    InvalidFormat,
}

impl ViolationKind {
    /// Stable snake_case name, used in audit details.
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::ProtectedBranch => "protected_branch",
            ViolationKind::MissingPrefix => "missing_prefix",
            ViolationKind::SubjectTooLong => "subject_too_long",
            ViolationKind::InvalidFormat => "invalid_format",
        }
    }
}

impl PolicyViolation {
    /// The rule that fired.
    pub fn kind(&self) -> ViolationKind {
        match self {
            PolicyViolation::ProtectedBranch { .. } => ViolationKind::ProtectedBranch,
            PolicyViolation::MissingPrefix { .. } => ViolationKind::MissingPrefix,
            PolicyViolation::SubjectTooLong { .. } => ViolationKind::SubjectTooLong,
            PolicyViolation::InvalidFormat { .. } => ViolationKind::InvalidFormat,
        }
    }
}

/// Validates candidate names and messages against a borrowed [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct PolicyEnforcer<'a> {
    config: &'a Config,
}

impl<'a> PolicyEnforcer<'a> {
    /// Create an enforcer over `config`.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// The configuration this enforcer checks against.
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Validate a branch name for creation.
    ///
    /// # Errors
    ///
    /// Returns `ProtectedBranch` for protected names, otherwise
    /// `MissingPrefix` if a prefix is required and absent.
    pub fn validate_branch_name(&self, name: &str) -> Result<(), PolicyViolation> {
        let policy = &self.config.branch;

        if policy.protected_branches.iter().any(|b| b == name) {
            return Err(PolicyViolation::ProtectedBranch {
                branch: name.to_string(),
            });
        }

        if policy.prefix_required {
            let has_prefix = policy.allowed_prefixes.iter().any(|prefix| {
                name.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            });
            if !has_prefix {
                return Err(PolicyViolation::MissingPrefix {
                    branch: name.to_string(),
                    allowed_prefixes: policy.allowed_prefixes.clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate a commit message.
    ///
    /// Only the subject (text before the first `\n`) is checked.
    ///
    /// # Errors
    ///
    /// Returns `SubjectTooLong` if the subject exceeds the limit, otherwise
    /// `InvalidFormat` if conventional commits are enforced and the subject
    /// does not conform.
    pub fn validate_commit_message(&self, message: &str) -> Result<(), PolicyViolation> {
        let policy = &self.config.commit;
        let subject = message.split('\n').next().unwrap_or_default();

        let limit = policy.max_subject_length.get();
        let length = subject.chars().count();
        if length > limit {
            return Err(PolicyViolation::SubjectTooLong { length, limit });
        }

        if !policy.conventional_commits {
            return Ok(());
        }

        let issue = match conventional::parse_subject(subject) {
            None => Some(FormatIssue::Malformed),
            Some(parsed) if !policy.allowed_types.iter().any(|t| t == parsed.kind) => {
                Some(FormatIssue::UnknownType(parsed.kind.to_string()))
            }
            Some(parsed) if policy.require_scope && parsed.scope.is_none() => {
                Some(FormatIssue::MissingScope)
            }
            Some(_) => None,
        };

        match issue {
            Some(issue) => Err(PolicyViolation::InvalidFormat {
                subject: subject.to_string(),
                allowed_types: policy.allowed_types.clone(),
                issue,
            }),
            None => Ok(()),
        }
    }
}
