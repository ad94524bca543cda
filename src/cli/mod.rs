// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! initplug [global options] <command>
//! version
//! options
//! inis
//! git [--image IMG] [--working-dir DIR] [--compact] -- PARAMETERS...
//! ```

pub mod git;
pub mod global;


use clap::{Parser, Subcommand};

use self::git::GitArgs;
use self::global::GlobalOptions;

/// Renders the init containers that workload plugins add to a pod.
#[derive(Debug, Parser)]
#[command(
    name = "initplug",
    author,
    version,
    about = "Init container plugin renderer",
    long_about = "Builds the init container a workload plugin contributes to a\n\
                  pod template and prints it as JSON. Plugin parameters are\n\
                  passed after `--`, e.g.\n\
                  `initplug git -- -repourl https://host/repo.git -repofolder src`.",
    after_help = "CONFIG FILES:\n\n\
                  `initplug.toml` in the current directory is read when present\n\
                  (skip it with --no-default-inis), then every --ini in order.\n\
                  INITPLUG_<SECTION>__<KEY> variables (e.g. INITPLUG_PLUGINS__BASE_DIR)\n\
                  override the files; --set and the log flags override everything."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prints the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Prints every effective option as `key = value`.
    Options,

    /// Lists the configuration sources in load order.
    Inis,

    /// Prints the git plugin's init container.
    Git(GitArgs),
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
