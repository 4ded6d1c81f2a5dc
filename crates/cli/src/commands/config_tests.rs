// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::cli::{ConfigArgs, OverrideArgs};
use crate::commands::load_config;
use crate::error::Error;
use crate::config::ConfigError;
use tempfile::TempDir;

fn render(config: &Config) -> String {
    let mut out = Vec::new();
    write_config(config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn defaults_render_both_sections() {
    let text = render(&Config::default());
    assert!(text.contains("[sync]"));
    assert!(text.contains("url = \"ws://localhost:8000/ws\""));
    assert!(text.contains("[store]"));
    assert!(text.contains("undo_window_secs = 30"));
}

#[test]
fn rendered_config_parses_back() {
    let config = Config::default()
        .with_overrides(None, Some("demo-maya-001".to_string()))
        .unwrap();
    let reparsed = Config::parse(&render(&config)).unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn overrides_win_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trip.toml");
    std::fs::write(&path, "[sync]\nurl = \"ws://file/ws\"\nsession_id = \"from-file\"\n").unwrap();

    let config = load_config(
        ConfigArgs {
            config: Some(path),
        },
        OverrideArgs {
            url: Some("wss://flag/ws".to_string()),
            session: None,
        },
    )
    .unwrap();

    assert_eq!(config.sync.url, "wss://flag/ws");
    assert_eq!(config.sync.session_id.as_deref(), Some("from-file"));
}

#[test]
fn invalid_override_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trip.toml");
    std::fs::write(&path, "").unwrap();

    let result = load_config(
        ConfigArgs {
            config: Some(path),
        },
        OverrideArgs {
            url: Some("http://flag".to_string()),
            session: None,
        },
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidUrl(_)))
    ));
}
