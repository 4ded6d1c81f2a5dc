// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::config::ConfigError;
use crate::sync::SyncError;

/// All errors that can stop the `detour` command.
///
/// Connection trouble is not among them: it only ever shows up as the store
/// being disconnected.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown command '{0}'\n  hint: valid commands are: undo, clear, join <id>, status, quit")]
    UnknownCommand(String),

    #[error("{command} requires {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

/// A specialized Result type for dtrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
