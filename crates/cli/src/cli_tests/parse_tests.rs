// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("detour").chain(args.iter().copied())).unwrap()
}

#[test]
fn watch_without_flags() {
    let cli = parse(&["watch"]);
    assert!(!cli.verbose);
    match cli.command {
        Command::Watch { overrides, config } => {
            assert!(overrides.url.is_none());
            assert!(overrides.session.is_none());
            assert!(config.config.is_none());
        }
        other => panic!("expected watch, got {other:?}"),
    }
}

#[test]
fn watch_with_every_flag() {
    let cli = parse(&[
        "watch",
        "--url",
        "wss://replan.example/ws",
        "--session",
        "demo-maya-001",
        "--config",
        "trip.toml",
        "--verbose",
    ]);
    assert!(cli.verbose);
    match cli.command {
        Command::Watch { overrides, config } => {
            assert_eq!(overrides.url.as_deref(), Some("wss://replan.example/ws"));
            assert_eq!(overrides.session.as_deref(), Some("demo-maya-001"));
            assert_eq!(config.config, Some(PathBuf::from("trip.toml")));
        }
        other => panic!("expected watch, got {other:?}"),
    }
}

#[test]
fn short_flags() {
    match parse(&["watch", "-u", "ws://h/ws", "-s", "abc", "-c", "x.toml"]).command {
        Command::Watch { overrides, config } => {
            assert_eq!(overrides.url.as_deref(), Some("ws://h/ws"));
            assert_eq!(overrides.session.as_deref(), Some("abc"));
            assert_eq!(config.config, Some(PathBuf::from("x.toml")));
        }
        other => panic!("expected watch, got {other:?}"),
    }
}

#[test]
fn config_accepts_overrides() {
    match parse(&["config", "-s", "abc"]).command {
        Command::Config { overrides, .. } => {
            assert_eq!(overrides.session.as_deref(), Some("abc"));
        }
        other => panic!("expected config, got {other:?}"),
    }
}

#[test]
fn verbose_is_global() {
    assert!(parse(&["--verbose", "config"]).verbose);
}

#[test]
fn blank_session_is_rejected() {
    let result = Cli::try_parse_from(["detour", "watch", "--session", "  "]);
    assert!(result.is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["detour"]).is_err());
}

#[test]
fn version_flags_short_circuit() {
    for flag in ["-v", "-V", "--version"] {
        let err = Cli::try_parse_from(["detour", flag]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
