// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, PluginsConfig
//! PluginsConfig.images: plugin name → image reference
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default working directory handed to plugins at construction.
pub const DEFAULT_BASE_DIR: &str = "/home/coder/project";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: PathBuf,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Trace,
            log_file: PathBuf::new(),
            json_log: false,
        }
    }
}

/// Per-plugin image overrides, keyed by plugin name.
pub type ImageOverrides = BTreeMap<String, String>;

/// Settings the framework applies to every plugin it constructs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginsConfig {
    /// Working directory inside the init container.
    pub base_dir: String,
    /// Image overrides applied after construction.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub images: ImageOverrides,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            base_dir: DEFAULT_BASE_DIR.to_string(),
            images: ImageOverrides::new(),
        }
    }
}

impl PluginsConfig {
    /// Image override configured for `plugin`, if any.
    #[must_use]
    pub fn image_for(&self, plugin: &str) -> Option<&str> {
        self.images
            .get(plugin)
            .map(String::as_str)
            .filter(|image| !image.is_empty())
    }
}
