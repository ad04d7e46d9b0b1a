//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Workflow policy lives in a single TOML file, `.gwa.toml`, at the
//! repository root. It has three optional sections: `branch`, `commit`
//! and `pr`.
//!
//! # Resolution
//!
//! 1. An explicit path, if the caller supplies one
//! 2. `.gwa.toml` relative to the current working directory
//!
//! A missing file is not an error: the result is built entirely from
//! defaults. A file that exists but does not parse, or that carries an
//! invalid value, is always an error.
//!
//! Keys the schema does not know are ignored and reported as warnings.
//!
//! # Example
//!
//! ```no_run
//! use gwa_policy::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo/.gwa.toml"))).unwrap();
//! let config = result.config;
//!
//! println!("Main branch: {}", config.branch.main_branch);
//! println!("Subject limit: {}", config.commit.max_subject_length);
//! ```

pub mod schema;

pub use schema::{BranchPolicy, CommitPolicy, Config, PrPolicy};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::CONFIG_FILE_NAME;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
    /// The file the configuration came from, if one existed.
    pub loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, or from `.gwa.toml` in the current
    /// directory when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if a value fails validation. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ConfigLoadResult {
                config: Config::default(),
                warnings: Vec::new(),
                loaded_from: None,
            });
        }

        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let (config, warnings) = Self::parse(&contents, &path)?;
        for warning in &warnings {
            tracing::warn!(path = %warning.path.display(), "{}", warning.message);
        }
        tracing::debug!(path = %path.display(), "loaded config");

        Ok(ConfigLoadResult {
            config,
            warnings,
            loaded_from: Some(path),
        })
    }

    /// Parse configuration from TOML text.
    ///
    /// Unknown keys are ignored silently; use [`Config::load`] to have
    /// them reported.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` for malformed TOML, wrongly typed
    /// values, or values that fail validation.
    pub fn from_toml_str(contents: &str) -> Result<Config, ConfigError> {
        Self::parse(contents, Path::new("<memory>")).map(|(config, _)| config)
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    fn parse(contents: &str, path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
        let table: toml::Table = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_keys(&table)
            .into_iter()
            .map(|key| ConfigWarning {
                message: format!("ignoring unknown config key '{}'", key),
                path: path.to_path_buf(),
            })
            .collect();

        let config: Config =
            toml::Value::Table(table)
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::ParseError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;

        Ok((config, warnings))
    }
}

/// Collect dotted names of keys the schema does not recognize.
fn unknown_keys(table: &toml::Table) -> Vec<String> {
    let mut unknown = Vec::new();

    for (section, value) in table {
        let known = schema::KNOWN_KEYS
            .iter()
            .find(|(name, _)| *name == section.as_str())
            .map(|(_, fields)| *fields);

        match (known, value) {
            (None, _) => unknown.push(section.clone()),
            (Some(fields), toml::Value::Table(inner)) => {
                for key in inner.keys() {
                    if !fields.contains(&key.as_str()) {
                        unknown.push(format!("{}.{}", section, key));
                    }
                }
            }
            // A known section with a non-table value fails deserialization.
            (Some(_), _) => {}
        }
    }

    unknown
}
