// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from layered sources.
//!
//! ```text
//! layers (in call order)      env            overrides
//! default file | --ini | str  INITPLUG_*     --set k=v
//!          \                    |              /
//!           +------------ build() -----------+
//!                            |
//!                            v
//!                          Config
//! ```
//!
//! Sources are only recorded until `build()`, so the `inis` command can list
//! them without reading anything.

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone)]
enum Layer {
    /// Skipped when missing.
    Default(PathBuf),
    /// Must exist.
    Ini(PathBuf),
    Inline(String),
}

/// Collects configuration sources; later sources win.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    layers: Vec<Layer>,
    env_prefix: Option<String>,
    overrides: Vec<(String, String)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>) -> Self {
        self.layers.push(Layer::Ini(path.as_ref().to_path_buf()));
        self
    }

    /// Adds a TOML file that is silently skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional(mut self, path: impl AsRef<Path>) -> Self {
        self.layers.push(Layer::Default(path.as_ref().to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.layers.push(Layer::Inline(content.to_string()));
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables.
    ///
    /// Keys use `__` as the nesting separator because config keys
    /// themselves contain underscores (`INITPLUG_PLUGINS__BASE_DIR`).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Records a `section.key=value` override as given on the command line.
    ///
    /// `section/key` is accepted as well.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the option has no `=` or an
    /// empty key.
    pub fn set_option(mut self, option: &str) -> std::result::Result<Self, ConfigError> {
        self.overrides.push(parse_option(option)?);
        Ok(self)
    }

    /// Reads every source and merges them into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a source is not
    /// valid TOML, or the merged values do not fit [`Config`].
    pub fn build(self) -> Result<Config> {
        let mut builder = config::Config::builder();
        for layer in self.layers {
            builder = match layer {
                Layer::Default(path) => builder.add_source(
                    File::from(path)
                        .format(FileFormat::Toml)
                        .required(false),
                ),
                Layer::Ini(path) => builder.add_source(
                    File::from(path)
                        .format(FileFormat::Toml)
                        .required(true),
                ),
                Layer::Inline(content) => {
                    builder.add_source(File::from_str(&content, FileFormat::Toml))
                }
            };
        }
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        for (key, value) in self.overrides {
            builder = builder
                .set_override(&key, value)
                .with_context(|| format!("invalid option key '{key}'"))?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        tracing::debug!(base_dir = %config.plugins.base_dir, "configuration loaded");
        Ok(config)
    }

    /// Numbered listing of the sources `build()` will read.
    ///
    /// Optional files that do not exist are left out.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Default(path) if !path.exists() => None,
                Layer::Default(path) => Some(format!("[optional] {}", path.display())),
                Layer::Ini(path) => Some(format!("[file] {}", path.display())),
                Layer::Inline(_) => Some("[string] <string>".to_string()),
            })
            .enumerate()
            .map(|(i, line)| format!("{}. {line}", i + 1))
            .collect()
    }
}

/// Splits `section.key=value` into a dotted key and its value.
pub(crate) fn parse_option(option: &str) -> std::result::Result<(String, String), ConfigError> {
    let invalid = |message: &str| ConfigError::ParseError {
        path: "--set".to_string(),
        message: format!("{message}: '{option}'"),
    };

    let (key, value) = option
        .split_once('=')
        .ok_or_else(|| invalid("expected KEY=VALUE"))?;
    let key = key.trim().replace('/', ".");
    if key.is_empty() || key.starts_with('.') || key.ends_with('.') {
        return Err(invalid("empty option key"));
    }
    Ok((key, value.to_string()))
}
