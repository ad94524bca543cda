// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git plugin command implementation.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::cli::git::GitArgs;
use crate::config::Config;
use crate::error::Result;
use crate::plugin::git::GitPlugin;
use crate::plugin::{InitPlugin, PluginClients};

/// Builds the git plugin the way the framework does.
///
/// Construction uses `plugins.base_dir`; then the configured image
/// override and the command-line overrides go through the plugin's hooks.
#[must_use]
pub fn build_git_plugin(args: &GitArgs, config: &Arc<Config>) -> GitPlugin {
    let clients = PluginClients::new(Arc::clone(config));
    let mut plugin = GitPlugin::create(clients, &args.parameters, &config.plugins.base_dir);

    if let Some(image) = config.plugins.image_for(GitPlugin::NAME) {
        plugin.set_default_image(image);
    }
    if let Some(image) = &args.image {
        plugin.set_default_image(image);
    }
    if let Some(dir) = &args.working_dir {
        plugin.set_working_dir(dir);
    }
    plugin
}

/// Renders the init container as JSON.
///
/// # Errors
///
/// Returns an error if the container cannot be serialized.
pub fn render_git_container(args: &GitArgs, config: &Arc<Config>) -> Result<String> {
    let plugin = build_git_plugin(args, config);
    if let Some(err) = plugin.parse_error() {
        warn!(plugin = plugin.name(), error = %err, "rendering with partial parameters");
    }
    info!(
        plugin = plugin.name(),
        image = plugin.image_url(),
        repo_folder = plugin.repo_folder(),
        "rendering init container"
    );

    let container = plugin.init_container();
    let json = if args.compact {
        serde_json::to_string(&container)
    } else {
        serde_json::to_string_pretty(&container)
    };
    json.context("failed to serialize init container")
}

/// Main handler for the git command.
///
/// # Errors
///
/// Returns an error if the container cannot be serialized.
pub fn run_git_command(args: &GitArgs, config: &Arc<Config>) -> Result<()> {
    let json = render_git_container(args, config)?;
    println!("{json}");
    Ok(())
}
