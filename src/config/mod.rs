// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. initplug.toml (cwd, optional)
//! 3. --ini FILE (repeatable, required)
//! 4. INITPLUG_* env vars
//! 5. --set KEY=VALUE / CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! INITPLUG_GLOBAL__OUTPUT_LOG_LEVEL=4  → global.output_log_level = 4
//! INITPLUG_PLUGINS__BASE_DIR=/work     → plugins.base_dir = "/work"
//! INITPLUG_PLUGINS__IMAGES__GIT=x:1    → plugins.images.git = "x:1"
//! ```
//!
//! # Example
//!
//! ```toml
//! [plugins]
//! base_dir = "/home/coder/project"
//!
//! [plugins.images]
//! git = "registry.local/alpine/git:1.0.8"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalConfig, PluginsConfig};

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "initplug.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "INITPLUG";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Plugin framework options.
    pub plugins: PluginsConfig,
}

impl Config {
    /// Starts an empty [`ConfigLoader`].
    ///
    /// ```no_run
    /// use initplug_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("/etc/initplug/operator.toml")
    ///     .with_env_prefix("INITPLUG")
    ///     .set_option("plugins.base_dir=/work")?
    ///     .build()?;
    /// assert_eq!(config.plugins.base_dir, "/work");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Reads one TOML file on top of the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, is not TOML, or holds unknown keys.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Reads TOML text on top of the defaults.
    ///
    /// # Errors
    ///
    /// Fails if `content` is not TOML or holds unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Effective options as aligned `section.key = value` lines, sorted
    /// by key.
    ///
    /// Keys come from the serialized form, so every field of [`Config`] is
    /// listed without being named here. Empty image tables are left out.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        let value = serde_json::to_value(self).unwrap_or_default();
        flatten_into(&mut options, String::new(), &value);

        let width = options.keys().map(String::len).max().unwrap_or(0);
        options
            .iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}

fn flatten_into(options: &mut BTreeMap<String, String>, key: String, value: &serde_json::Value) {
    use serde_json::Value;

    match value {
        Value::Null => {}
        Value::Object(fields) => {
            for (name, field) in fields {
                let child = if key.is_empty() {
                    name.clone()
                } else {
                    format!("{key}.{name}")
                };
                flatten_into(options, child, field);
            }
        }
        Value::String(text) => {
            options.insert(key, text.clone());
        }
        other => {
            options.insert(key, other.to_string());
        }
    }
}
