// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Nothing listens here, so every connect attempt is refused.
pub const UNREACHABLE_URL: &str = "ws://127.0.0.1:9/ws";

pub fn detour() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("detour").unwrap();
    cmd.env_remove("DETOUR_LOG")
        .env_remove("COLOR")
        .env("NO_COLOR", "1");
    cmd
}

/// A temp directory holding `detour.toml` with the given content.
pub fn temp_with_config(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("detour.toml");
    std::fs::write(&path, content).unwrap();
    (temp, path)
}
