// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for dt-core operations.

use thiserror::Error;

/// All possible errors that can occur in dt-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {kind}: '{value}'\n  hint: valid values are: {valid}")]
    InvalidValue {
        kind: &'static str,
        value: String,
        valid: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// A specialized Result type for dt-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
