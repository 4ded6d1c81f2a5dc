// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use std::path::PathBuf;

use clap::Args;

/// Where to read configuration from.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// Configuration file (default: ./detour.toml if present)
    #[arg(long, short = 'c', value_name = "path")]
    pub config: Option<PathBuf>,
}

/// Values that override the configuration file.
#[derive(Args, Clone, Debug, Default)]
pub struct OverrideArgs {
    /// Server WebSocket URL (ws:// or wss://)
    #[arg(long, short = 'u', value_name = "url")]
    pub url: Option<String>,

    /// Session to join on connect
    #[arg(long, short = 's', value_name = "id", value_parser = super::non_empty_string)]
    pub session: Option<String>,
}
