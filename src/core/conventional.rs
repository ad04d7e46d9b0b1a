//! core::conventional
//!
//! Structural parsing of conventional commit subjects.
//!
//! A subject has the shape `type(scope): description` or
//! `type: description`. Parsing only recognizes the shape; whether the
//! type is allowed and whether a scope is required is decided by the
//! caller against configuration. Type strings are compared literally, so
//! configured types may contain any characters.

/// A subject line split into its conventional commit parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject<'a> {
    /// The commit type, e.g. `feat`.
    pub kind: &'a str,
    /// The scope between parentheses, if present. Never empty.
    pub scope: Option<&'a str>,
    /// Free text after `": "`. Never empty.
    pub description: &'a str,
}

/// Split a subject line into `type`, optional `scope`, and description.
///
/// The type runs up to the first `(` or `:`. A scope must hold at least
/// one character and ends at the first `"): "` after it. Returns `None`
/// when the subject does not have the conventional shape.
///
/// # Example
///
/// ```
/// use gwa_policy::core::conventional::parse_subject;
///
/// let subject = parse_subject("fix(auth): handle expired tokens").unwrap();
/// assert_eq!(subject.kind, "fix");
/// assert_eq!(subject.scope, Some("auth"));
/// assert_eq!(subject.description, "handle expired tokens");
///
/// assert!(parse_subject("Added a thing").is_none());
/// ```
pub fn parse_subject(subject: &str) -> Option<Subject<'_>> {
    let split = subject.find(['(', ':'])?;
    let (kind, rest) = subject.split_at(split);

    let (scope, description) = match rest.strip_prefix('(') {
        Some(inner) => {
            let (end, _) = inner.match_indices("): ").find(|(idx, _)| *idx > 0)?;
            (Some(&inner[..end]), &inner[end + 3..])
        }
        None => (None, rest.strip_prefix(": ")?),
    };

    if description.is_empty() {
        return None;
    }

    Some(Subject {
        kind,
        scope,
        description,
    })
}
