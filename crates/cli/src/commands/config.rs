// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use crate::config::Config;
use crate::error::Result;

/// Print the effective configuration.
pub fn run(config: &Config) -> Result<()> {
    write_config(config, &mut std::io::stdout().lock())
}

fn write_config(config: &Config, out: &mut impl Write) -> Result<()> {
    out.write_all(config.to_toml()?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
