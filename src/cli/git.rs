// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git plugin command arguments.
//!
//! ```text
//! git [--image IMG] [--working-dir DIR] [--compact] -- -repourl URL [-repofolder NAME]
//!   → prints the init container as JSON
//! ```
//!
//! Plugin parameters go after `--` so they reach the plugin untouched.

use clap::Args;

/// Arguments for the `git` command.
#[derive(Debug, Clone, Default, Args)]
pub struct GitArgs {
    /// Overrides the clone image (wins over `plugins.images.git`).
    #[arg(long, value_name = "IMAGE")]
    pub image: Option<String>,

    /// Overrides the working directory (wins over `plugins.base_dir`).
    #[arg(short = 'w', long = "working-dir", value_name = "DIR")]
    pub working_dir: Option<String>,

    /// Prints the container on a single line.
    #[arg(long)]
    pub compact: bool,

    /// Plugin parameters, e.g. `-repourl https://host/repo.git -repofolder src`.
    #[arg(last = true, value_name = "PARAMETERS")]
    pub parameters: Vec<String>,
}
