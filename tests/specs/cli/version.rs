// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::common::*;
use yare::parameterized;

#[parameterized(
    long_version = { "--version" },
    short_v = { "-v" },
    silent_v = { "-V" },
)]
fn version_flag_outputs_version(flag: &str) {
    detour()
        .arg(flag)
        .assert()
        .success()
        .stdout(predicate::str::contains("detour"))
        .stdout(predicate::str::is_match(r"[0-9]+\.[0-9]+\.[0-9]+").unwrap());
}

#[test]
fn v_and_version_produce_identical_output() {
    let v_output = detour().arg("-v").output().unwrap();
    let version_output = detour().arg("--version").output().unwrap();
    assert_eq!(v_output.stdout, version_output.stdout);
}

#[test]
fn version_flags_documented_in_help() {
    detour()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-v"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn big_v_not_documented_in_help() {
    let output = detour().arg("--help").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains(" -V,"), "-V should not be documented in help");
    assert!(!stdout.contains("[-V"), "-V should not be documented in help");
}

#[test]
fn version_subcommand_does_not_exist() {
    detour().arg("version").assert().failure();
}
