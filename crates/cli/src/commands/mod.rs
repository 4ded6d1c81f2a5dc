// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod watch;

use crate::cli::{ConfigArgs, OverrideArgs};
use crate::config::Config;
use crate::error::Result;

/// Load configuration and apply command-line overrides.
pub fn load_config(config: ConfigArgs, overrides: OverrideArgs) -> Result<Config> {
    let loaded = Config::load(config.config.as_deref())?;
    Ok(loaded.with_overrides(overrides.url, overrides.session)?)
}
