//! core
//!
//! Core domain types, schemas, and operations for gwa.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading
//! - [`policy`] - Branch name and commit message enforcement
//! - [`conventional`] - Conventional commit subject parsing
//! - [`audit`] - Append-only audit trail
//! - [`paths`] - Centralized path routing for gwa storage
//! - [`types`] - Strong types: SubjectLength, UtcTimestamp
//!
//! # Error Kinds
//!
//! The three failure kinds are disjoint types:
//! - [`config::ConfigError`] - bad configuration, fatal to loading
//! - [`policy::PolicyViolation`] - rejected input, recoverable
//! - [`audit::AuditError`] - audit trail I/O or parse failure

pub mod audit;
pub mod config;
pub mod conventional;
pub mod paths;
pub mod policy;
pub mod types;
