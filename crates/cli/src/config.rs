// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is read from `detour.toml` (or `--config <path>`) and has
//! two sections:
//! - `[sync]`: event channel endpoint, reconnect delay, session to join
//! - `[store]`: undo window and diff display durations
//!
//! Every field has a default, so an empty or missing file is valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::StoreConfig;
use crate::sync::SyncConfig;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "detour.toml";

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid sync url '{0}'\n  hint: the url must start with ws:// or wss://")]
    InvalidUrl(String),

    #[error("session id cannot be empty")]
    EmptySession,
}

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncSection,
    pub store: StoreSection,
}

/// `[sync]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSection {
    /// Event channel endpoint (default: `ws://localhost:8000/ws`).
    pub url: String,
    /// Fixed delay between reconnection attempts in milliseconds (default: 1000).
    pub reconnect_delay_ms: u64,
    /// Session to join on startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Default for SyncSection {
    fn default() -> Self {
        SyncSection {
            url: "ws://localhost:8000/ws".to_string(),
            reconnect_delay_ms: 1000,
            session_id: None,
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// How long an update can be undone, in seconds (default: 30).
    pub undo_window_secs: u64,
    /// How long a diff stays on display, in seconds (default: 5).
    pub diff_display_secs: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            undo_window_secs: 30,
            diff_display_secs: 5,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or `detour.toml` in the working
    /// directory when `path` is `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                match Self::load_file(path) {
                    Err(ConfigError::NotFound(_)) => Ok(Config::default()),
                    other => other,
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse(&content)
    }

    /// Parses and validates a TOML document.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.sync.url;
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(ConfigError::InvalidUrl(url.clone()));
        }
        if self
            .sync
            .session_id
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            return Err(ConfigError::EmptySession);
        }
        Ok(())
    }

    /// Applies command-line overrides and re-validates.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        session_id: Option<String>,
    ) -> Result<Config, ConfigError> {
        if let Some(url) = url {
            self.sync.url = url;
        }
        if session_id.is_some() {
            self.sync.session_id = session_id;
        }
        self.validate()?;
        Ok(self)
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            url: self.sync.url.clone(),
            reconnect_delay: Duration::from_millis(self.sync.reconnect_delay_ms),
            session_id: self.sync.session_id.clone(),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            undo_window: Duration::from_secs(self.store.undo_window_secs),
            diff_display: Duration::from_secs(self.store.diff_display_secs),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
