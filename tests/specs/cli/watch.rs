// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use super::common::*;

fn watch_offline() -> assert_cmd::Command {
    let mut cmd = detour();
    cmd.args(["watch", "--url", UNREACHABLE_URL])
        .timeout(Duration::from_secs(20));
    cmd
}

#[test]
fn watch_rejects_non_websocket_url() {
    detour()
        .args(["watch", "--url", "http://localhost:8000"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: invalid sync url 'http://localhost:8000'"));
}

#[test]
fn watch_rejects_missing_config() {
    detour()
        .args(["watch", "--config", "/nonexistent/detour.toml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn watch_exits_cleanly_at_end_of_input() {
    let temp = TempDir::new().unwrap();
    watch_offline()
        .current_dir(temp.path())
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn watch_quit_command_exits() {
    let temp = TempDir::new().unwrap();
    watch_offline()
        .current_dir(temp.path())
        .write_stdin("quit\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("status:").not());
}

#[test]
fn watch_status_reports_no_itinerary_while_offline() {
    let temp = TempDir::new().unwrap();
    watch_offline()
        .current_dir(temp.path())
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("status: "))
        .stdout(predicate::str::contains("no itinerary"));
}

#[test]
fn watch_announces_configured_session() {
    let temp = TempDir::new().unwrap();
    watch_offline()
        .current_dir(temp.path())
        .args(["--session", "demo-maya-001"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("joined session demo-maya-001"));
}

#[test]
fn watch_reports_bad_input_and_keeps_going() {
    let temp = TempDir::new().unwrap();
    watch_offline()
        .current_dir(temp.path())
        .write_stdin("redo\njoin\nundo\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("error: unknown command 'redo'"))
        .stderr(predicate::str::contains("error: join requires a session id"))
        .stdout(predicate::str::contains("nothing to undo"));
}
