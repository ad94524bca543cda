// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `inis` commands.

use crate::config::Config;
use crate::config::loader::ConfigLoader;

/// Effective configuration, one `key = value` per line.
#[must_use]
pub fn render_options(config: &Config) -> String {
    config.format_options().join("\n")
}

/// Configuration sources in load order.
#[must_use]
pub fn render_inis(sources: &ConfigLoader) -> String {
    let files = sources.format_loaded_files();
    if files.is_empty() {
        "No configuration files loaded".to_string()
    } else {
        files.join("\n")
    }
}

pub fn run_options_command(config: &Config) {
    println!("{}", render_options(config));
}

pub fn run_inis_command(sources: &ConfigLoader) {
    println!("{}", render_inis(sources));
}
