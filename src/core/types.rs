//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`SubjectLength`] - Validated maximum commit subject length
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a loaded configuration never carries a
//! subject limit below the minimum.
//!
//! # Examples
//!
//! ```
//! use gwa_policy::core::types::SubjectLength;
//!
//! let limit = SubjectLength::new(72).unwrap();
//! assert_eq!(limit.get(), 72);
//!
//! assert!(SubjectLength::new(9).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::core::config::ConfigError;

/// Maximum number of characters allowed in a commit subject line.
///
/// Always at least [`SubjectLength::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SubjectLength(usize);

impl SubjectLength {
    /// Smallest accepted limit.
    pub const MIN: usize = 10;

    /// Limit used when none is configured.
    pub const DEFAULT: usize = 72;

    /// Create a validated subject length.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `value` is below [`Self::MIN`].
    pub fn new(value: usize) -> Result<Self, ConfigError> {
        if value < Self::MIN {
            return Err(ConfigError::InvalidValue(format!(
                "max_subject_length must be at least {}, got {}",
                Self::MIN,
                value
            )));
        }
        Ok(Self(value))
    }

    /// Get the limit as a character count.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for SubjectLength {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for SubjectLength {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = usize::try_from(value).map_err(|_| {
            ConfigError::InvalidValue(format!(
                "max_subject_length must be at least {}, got {}",
                Self::MIN,
                value
            ))
        })?;
        Self::new(value)
    }
}

impl From<SubjectLength> for i64 {
    fn from(value: SubjectLength) -> Self {
        i64::try_from(value.0).unwrap_or(i64::MAX)
    }
}

impl std::fmt::Display for SubjectLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp, serialized as RFC3339.
///
/// # Example
///
/// ```
/// use gwa_policy::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
