// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Init container plugins.
//!
//! ```text
//! framework: (PluginClients, tokens, base_dir)
//!        |
//!        v
//!  P::create() --> FlagSet::parse (errors logged, never raised)
//!        |
//!        v
//!  set_default_image / set_working_dir   (optional overrides)
//!        |
//!        v
//!  init_container() --> k8s Container --> pod template
//! ```
//!
//! Every plugin implements [`InitPlugin`]. The framework keeps plugins as
//! `Box<dyn InitPlugin>` and drives them without knowing the variant.

use std::fmt;
use std::sync::Arc;

use k8s_openapi::api::core::v1::Container;

use crate::config::Config;
use crate::error::FlagError;

pub mod flags;
pub mod git;
pub mod shell;

/// Handle to framework facilities shared by every plugin instance.
///
/// Plugins store it but never mutate what it points to.
#[derive(Debug, Clone, Default)]
pub struct PluginClients {
    config: Arc<Config>,
}

impl PluginClients {
    #[must_use]
    pub const fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Returns a reference to the shared configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }
}

/// `imagePullPolicy` of generated init containers: use the cached image
/// if present, pull otherwise.
pub const IF_NOT_PRESENT: &str = "IfNotPresent";

/// Contract between the framework and an init container plugin.
///
/// # Implementation Notes
///
/// - `create` must not fail: parameter errors are logged, kept for
///   [`parse_error`](Self::parse_error) and replaced by defaults
/// - `init_container` must be pure and return the same container for the
///   same state
/// - overrides take effect on the next `init_container` call
pub trait InitPlugin: Send + Sync + fmt::Debug {
    /// Builds a plugin from its parameter tokens.
    ///
    /// # Arguments
    /// * `clients` - Shared framework facilities
    /// * `parameters` - Flag-style tokens (`-name value` or `-name=value`)
    /// * `base_dir` - Working directory inside the init container
    fn create(clients: PluginClients, parameters: &[String], base_dir: &str) -> Self
    where
        Self: Sized;

    /// Returns the registry name of this plugin (e.g., "git").
    fn name(&self) -> &'static str;

    /// Generates the init container for the current state.
    fn init_container(&self) -> Container;

    /// Replaces the image used by the init container.
    fn set_default_image(&mut self, image: &str);

    /// Replaces the working directory inside the init container.
    fn set_working_dir(&mut self, base_dir: &str);

    /// Error hit while parsing the parameters, if any.
    ///
    /// Construction succeeded regardless; the plugin runs on defaults for
    /// everything after the failing token.
    fn parse_error(&self) -> Option<&FlagError> {
        None
    }
}

/// Builds a plugin of type `P` behind a trait object.
#[must_use]
pub fn construct<P>(
    clients: PluginClients,
    parameters: &[String],
    base_dir: &str,
) -> Box<dyn InitPlugin>
where
    P: InitPlugin + 'static,
{
    Box::new(P::create(clients, parameters, base_dir))
}

/// Collects the init containers of `plugins`, in order.
#[must_use]
pub fn init_containers(plugins: &[Box<dyn InitPlugin>]) -> Vec<Container> {
    plugins
        .iter()
        .map(|plugin| {
            if let Some(err) = plugin.parse_error() {
                tracing::warn!(
                    plugin = plugin.name(),
                    error = %err,
                    "plugin built from partial parameters"
                );
            }
            plugin.init_container()
        })
        .collect()
}
