// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand};

pub use args::{ConfigArgs, OverrideArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(name = "detour")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Follow a live itinerary as the server replans around disruptions")]
#[command(
    long_about = "Follow a live itinerary as the server replans around disruptions.\n\n\
    Connects to the replanning server, joins a session and prints every change to the \
    itinerary, with a short window to undo each replan."
)]
// Allow the unit type field pattern which is required for clap's ArgAction::Version/Help
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Log sync activity to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect and print itinerary changes as they happen
    ///
    /// While running, type a command and press enter:
    /// undo, clear, join <id>, status, quit.
    #[command(after_help = "\
Examples:
  detour watch                                Use ./detour.toml or defaults
  detour watch -s demo-maya-001               Join a session on connect
  detour watch -u wss://replan.example/ws     Use another server")]
    Watch {
        #[command(flatten)]
        overrides: OverrideArgs,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        overrides: OverrideArgs,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
