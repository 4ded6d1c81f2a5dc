// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for watch output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Values: light grey
    pub const LITERAL: u8 = 250;
    /// Secondary details: medium grey
    pub const CONTEXT: u8 = 245;
    /// Good news (connected, savings): soft green
    pub const GOOD: u8 = 114;
    /// Attention (replanning, undo pending): amber
    pub const WARN: u8 = 179;
    /// Bad news (disruptions, dropped stops): soft red
    pub const ALERT: u8 = 174;

    /// Pre-formatted ANSI escape sequences for use in tests
    pub const HEADER_START: &str = "\x1b[38;5;74m";
    pub const ALERT_START: &str = "\x1b[38;5;174m";
    pub const RESET: &str = "\x1b[0m";
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    // NO_COLOR=1 disables colors
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }

    // COLOR=1 forces colors even without TTY
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }

    std::io::stdout().is_terminal()
}

/// Format a 256-color ANSI escape sequence for foreground color.
fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// ANSI reset sequence.
const RESET: &str = "\x1b[0m";

/// Colors text, or passes it through untouched when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    /// Palette for stdout, honouring `NO_COLOR` and `COLOR`.
    pub fn detect() -> Self {
        Self::new(should_colorize())
    }

    /// A palette that never emits escape sequences.
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, code: u8, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", fg256(code), text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn header(&self, text: &str) -> String {
        self.paint(codes::HEADER, text)
    }

    pub fn literal(&self, text: &str) -> String {
        self.paint(codes::LITERAL, text)
    }

    pub fn context(&self, text: &str) -> String {
        self.paint(codes::CONTEXT, text)
    }

    pub fn good(&self, text: &str) -> String {
        self.paint(codes::GOOD, text)
    }

    pub fn warn(&self, text: &str) -> String {
        self.paint(codes::WARN, text)
    }

    pub fn alert(&self, text: &str) -> String {
        self.paint(codes::ALERT, text)
    }
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
