// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options shared by every command.
//!
//! They only feed the configuration: file options become loader sources,
//! the rest become overrides on top of every source.
//!
//! ```text
//! initplug.toml (unless --no-default-inis) < --ini < INITPLUG_* < --set < -l/--log-file
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::config::loader::ConfigLoader;
use crate::config::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::ConfigError;
use crate::logging::LogLevel;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Additional TOML configuration file; repeat to layer several.
    #[arg(short = 'i', long = "ini", value_name = "FILE")]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Log file level; defaults to --log-level.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = parse_log_level)]
    pub file_log_level: Option<LogLevel>,

    /// Writes logs to FILE as well.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Overrides one option, e.g. 'plugins.base_dir=/work' or
    /// 'plugins.images.git=mirror/git:1'; repeatable.
    #[arg(short = 's', long = "set", value_name = "OPTION")]
    pub options: Vec<String>,

    /// Skips `initplug.toml` in the current directory.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Loader over the configuration files and environment, without the
    /// command-line overrides.
    #[must_use]
    pub fn config_sources(&self) -> ConfigLoader {
        let loader = if self.no_default_inis {
            ConfigLoader::new()
        } else {
            ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE)
        };
        self.inis
            .iter()
            .fold(loader, |loader, ini| loader.add_toml_file(ini))
            .with_env_prefix(ENV_PREFIX)
    }

    /// [`config_sources`](Self::config_sources) plus `--set` and the
    /// logging flags, which win over everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` for a malformed `--set` option.
    pub fn config_loader(&self) -> Result<ConfigLoader, ConfigError> {
        let mut loader = self.config_sources();
        for option in &self.options {
            loader = loader.set_option(option)?;
        }

        let file_level = self.file_log_level.or(self.log_level);
        let levels = [
            ("global.output_log_level", self.log_level),
            ("global.file_log_level", file_level),
        ];
        for (key, level) in levels {
            if let Some(level) = level {
                loader = loader.set_option(&format!("{key}={}", level.as_u8()))?;
            }
        }
        if let Some(path) = &self.log_file {
            loader = loader.set_option(&format!("global.log_file={}", path.display()))?;
        }
        Ok(loader)
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number from 0 to 6"))?;
    LogLevel::try_from(number).map_err(|err| err.to_string())
}
