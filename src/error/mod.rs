// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Result       command handlers, config loading, logging setup
//!   ^
//!   |  ?
//! ConfigError          bad --set option, out-of-range log level
//!
//! FlagError            plugin parameters; never propagated, kept as the
//!                      plugin's parse status
//! ```
//!
//! See [`crate::plugin::InitPlugin::parse_error`] for how flag errors reach
//! the framework.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration source.
    #[error("failed to parse config source '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Flag Errors ---

/// Errors raised while parsing plugin parameter tokens.
///
/// Messages follow the wording of the Go `flag` package, which is what the
/// operator's users see in their logs for every other plugin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// Token starts with a dash but is not a valid flag (`---x`, `-=x`).
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    /// Flag name was not declared.
    #[error("flag provided but not defined: -{0}")]
    Undefined(String),

    /// Flag was the last token and had no inline value.
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    /// `-h` or `-help` was passed and is not a declared flag.
    #[error("flag: help requested")]
    HelpRequested,
}
