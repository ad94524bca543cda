// initplug-rs: Init container plugins for Kubernetes workloads
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), git
//! ```

pub mod config;
pub mod git;
