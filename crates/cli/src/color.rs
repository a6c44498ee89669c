// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for `jg` output and help text.

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers and table headings: steel blue
    pub const HEADER: u8 = 74;
    /// Flags and literals in help: light grey
    pub const LITERAL: u8 = 250;
    /// Ids and secondary text: darker grey
    pub const MUTED: u8 = 240;
    /// `active` / `running`: soft green
    pub const GOOD: u8 = 108;
    /// `paused`: amber
    pub const WARN: u8 = 179;
    /// `failed`: soft red
    pub const BAD: u8 = 167;
}

/// Whether to emit ANSI colors.
///
/// Priority: `NO_COLOR=1` disables, `COLOR=1` forces, otherwise TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// clap `Styles` in the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Color a job or execution status word by its meaning.
pub fn status(text: &str) -> String {
    match text {
        "active" | "running" | "succeeded" => paint(codes::GOOD, text),
        "paused" => paint(codes::WARN, text),
        "failed" => paint(codes::BAD, text),
        _ => text.to_string(),
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
