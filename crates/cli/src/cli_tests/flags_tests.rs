// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::panic)]

use super::*;
use std::collections::{HashMap, HashSet};

/// Every short flag maps to its one allowed long form, and every allowed
/// short form is in use.
#[test]
fn test_flag_consistency() {
    use clap::CommandFactory;

    // Note: -h/--help is auto-managed by clap and not tracked here
    let allowed: HashMap<char, &str> = [
        ('v', "version"), // -v, --version (top-level only)
        ('u', "url"),
        ('s', "session"),
        ('c', "config"),
    ]
    .into_iter()
    .collect();

    let cmd = Cli::command();
    let mut errors = Vec::new();
    let mut used_shorts = HashSet::new();

    check_command_flags(&cmd, &allowed, &mut errors, &mut used_shorts);

    for (short_char, long_name) in &allowed {
        if !used_shorts.contains(short_char) {
            errors.push(format!(
                "-{} (--{}) is in allowed set but never used",
                short_char, long_name
            ));
        }
    }

    if !errors.is_empty() {
        panic!("Flag consistency violations:\n{}", errors.join("\n"));
    }
}

fn check_command_flags(
    cmd: &clap::Command,
    allowed: &HashMap<char, &str>,
    errors: &mut Vec<String>,
    used_shorts: &mut HashSet<char>,
) {
    let cmd_name = cmd.get_name();

    for arg in cmd.get_arguments() {
        let long = arg.get_long();
        let Some(short_char) = arg.get_short() else {
            continue;
        };
        if short_char == 'h' && long == Some("help") {
            continue;
        }
        used_shorts.insert(short_char);

        match (allowed.get(&short_char), long) {
            (Some(expected), Some(actual)) if actual != *expected => errors.push(format!(
                "{}: -{} maps to --{} but should map to --{}",
                cmd_name, short_char, actual, expected
            )),
            (Some(expected), None) => errors.push(format!(
                "{}: -{} has no long form, expected --{}",
                cmd_name, short_char, expected
            )),
            (None, _) => errors.push(format!(
                "{}: -{} (--{}) is not an allowed short flag",
                cmd_name,
                short_char,
                long.unwrap_or("(none)")
            )),
            _ => {}
        }
    }

    for subcmd in cmd.get_subcommands() {
        check_command_flags(subcmd, allowed, errors, used_shorts);
    }
}

#[test]
fn test_cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
