// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! GlobalConfig --> LogConfig --> init_logging()
//!                                  |
//!                     Vec<BoxedLayer> on registry
//!                     |                     |
//!                  stderr            log file (optional)
//!                  text              text | json, non_blocking
//!
//! LogLevel:  0=silent  1=error  2=warn  3=info
//!            4=debug   5=trace  6=dump (dependencies too)
//! ```
//!
//! Console output goes to stderr: stdout is reserved for rendered
//! container descriptors.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::types::GlobalConfig;
use crate::error::{ConfigError, Result};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Verbosity of one log output, written as a number from 0 to 6 in
/// configuration files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum LogLevel {
    Silent = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
    /// Trace, including dependencies.
    Dump = 6,
}

impl LogLevel {
    /// Numeric form used in config files.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// `EnvFilter` directives for this level.
    ///
    /// Between info and trace only this crate gets verbose; dependencies
    /// stay at `warn`.
    #[must_use]
    pub fn directives(self) -> String {
        let crate_level = match self {
            Self::Silent => return "off".to_string(),
            Self::Error => return "error".to_string(),
            Self::Warn => return "warn".to_string(),
            Self::Dump => return "trace".to_string(),
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        format!("warn,initplug_rs={crate_level},initplug={crate_level}")
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, ConfigError> {
        const LEVELS: [LogLevel; 7] = [
            LogLevel::Silent,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
            LogLevel::Dump,
        ];
        LEVELS
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "log_level".to_string(),
                message: format!("log level must be 0-6, got {value}"),
            })
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.as_u8()
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(default)]
    console: LogLevel,
    #[builder(default = LogLevel::Trace)]
    file: LogLevel,
    file_path: Option<PathBuf>,
    #[builder(default)]
    json: bool,
}

impl LogConfig {
    /// Log settings from the merged configuration, which already holds the
    /// `--log-level`/`--log-file` overrides. An empty `log_file` disables
    /// the file output.
    #[must_use]
    pub fn from_global(global: &GlobalConfig) -> Self {
        let file_path = Some(global.log_file.clone()).filter(|path| !path.as_os_str().is_empty());
        Self::builder()
            .console(global.output_log_level)
            .file(global.file_log_level)
            .maybe_file_path(file_path)
            .json(global.json_log)
            .build()
    }
}

/// Flushes the file output when dropped.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive until the program exits.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let mut layers = vec![console_layer(config.console)];

    let file_guard = match &config.file_path {
        Some(path) => {
            let (layer, guard) = file_layer(path, config.file, config.json)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry().with(layers).init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn console_layer(level: LogLevel) -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(level >= LogLevel::Trace)
        .with_filter(level.filter())
        .boxed()
}

fn file_layer(path: &Path, level: LogLevel, json: bool) -> Result<(BoxedLayer, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(level.filter())
            .boxed()
    } else {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(level.filter())
            .boxed()
    };
    Ok((layer, guard))
}
