// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::common::*;

#[test]
fn config_prints_defaults_without_a_file() {
    let temp = TempDir::new().unwrap();
    detour()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[sync]"))
        .stdout(predicate::str::contains("url = \"ws://localhost:8000/ws\""))
        .stdout(predicate::str::contains("reconnect_delay_ms = 1000"))
        .stdout(predicate::str::contains("undo_window_secs = 30"))
        .stdout(predicate::str::contains("diff_display_secs = 5"))
        .stdout(predicate::str::contains("session_id").not());
}

#[test]
fn config_reads_default_file_from_working_directory() {
    let (temp, _) = temp_with_config("[sync]\nsession_id = \"demo-maya-001\"\n");
    detour()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("session_id = \"demo-maya-001\""));
}

#[test]
fn config_flag_selects_file() {
    let (_temp, path) = temp_with_config("[store]\nundo_window_secs = 12\n");
    detour()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("undo_window_secs = 12"));
}

#[test]
fn flags_override_file_values() {
    let (_temp, path) = temp_with_config("[sync]\nurl = \"ws://file/ws\"\n");
    detour()
        .args(["config", "--url", "wss://flag/ws", "--session", "abc", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("url = \"wss://flag/ws\""))
        .stdout(predicate::str::contains("session_id = \"abc\""));
}

#[test]
fn missing_explicit_file_fails() {
    detour()
        .args(["config", "--config", "/nonexistent/detour.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: config file not found"));
}

#[test]
fn malformed_file_fails() {
    let (_temp, path) = temp_with_config("[sync\nurl = 1");
    detour()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn non_websocket_url_in_file_fails() {
    let (_temp, path) = temp_with_config("[sync]\nurl = \"http://localhost:8000\"\n");
    detour()
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ws:// or wss://"));
}
