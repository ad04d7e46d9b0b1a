//! gwa-policy - Policy enforcement and audit trail for git workflows
//!
//! Validates branch names and commit messages against a repository's
//! configured ruleset, and records every workflow action in an
//! append-only audit trail.
//!
//! # Architecture
//!
//! - [`core`] - Configuration model, policy enforcer, audit logger
//! - [`cli`] - Command-line interface layer (parses args, consults the core)
//! - [`ui`] - User-facing output
//!
//! The core never runs git, touches the network, or writes configuration.
//! Its only write is appending to the audit trail.

pub mod cli;
pub mod core;
pub mod ui;
