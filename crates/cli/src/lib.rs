// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dtrs - client for following an itinerary that a server replans live.
//!
//! This crate provides the core functionality for the `detour` CLI tool.
//!
//! # Main Components
//!
//! - [`ItineraryStore`] - The authoritative client state, with undo and diff
//!   display windows
//! - [`sync`] - The event channel: connection, reconnection and replay of
//!   updates that arrive while the channel is down
//! - [`Config`] - `detour.toml` loading and validation
//! - [`Error`] - Error types for all operations
//!
//! # Following a session
//!
//! ```rust,ignore
//! use dtrs::{Config, ItineraryStore, SyncClient};
//!
//! let config = Config::load(None)?;
//! let store = ItineraryStore::new(config.store_config());
//! let handle = SyncClient::new(config.sync_config(), store).start()?;
//! let mut changes = handle.store().subscribe();
//! while changes.changed().await.is_ok() {
//!     println!("{:?}", changes.borrow_and_update().itinerary);
//! }
//! ```

mod cli;
pub mod colors;
mod commands;
pub mod display;
#[cfg(test)]
mod test_helpers;

pub mod config;
pub mod error;
pub mod store;
pub mod sync;

pub use cli::{Cli, Command, ConfigArgs, OverrideArgs};
pub use config::Config;
pub use error::{Error, Result};
pub use store::{ItineraryStore, StoreConfig, StoreSnapshot};
pub use sync::{SyncClient, SyncConfig, SyncHandle};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Watch { overrides, config } => {
            let config = commands::load_config(config, overrides)?;
            commands::watch::run(&config)
        }
        Command::Config { overrides, config } => {
            let config = commands::load_config(config, overrides)?;
            commands::config::run(&config)
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
