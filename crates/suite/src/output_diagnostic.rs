// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output shared by the builder and runner binaries.
//!
//! Messages go to stderr, colored when stderr is a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy)]
enum Level {
    Error,
    Warning,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warning => "\x1b[33m",
        }
    }
}

/// Print a fatal or per-run error to stderr.
pub fn print_error(msg: impl Display) {
    emit(Level::Error, msg);
}

/// Print a recoverable problem to stderr.
pub fn print_warning(msg: impl Display) {
    emit(Level::Warning, msg);
}

fn emit(level: Level, msg: impl Display) {
    let stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    write_line(&mut stderr.lock(), level, msg, is_tty);
}

fn write_line<W: Write>(writer: &mut W, level: Level, msg: impl Display, is_terminal: bool) {
    let _ = if is_terminal {
        writeln!(writer, "{}{}: {}\x1b[0m", level.color(), level.label(), msg)
    } else {
        writeln!(writer, "{}: {}", level.label(), msg)
    };
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
