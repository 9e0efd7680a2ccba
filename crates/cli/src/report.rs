// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Classifying and printing execution results.

use std::fmt;
use std::io::Write;

use parking_lot::Mutex;

use crate::exec::ExecutionResult;
use crate::options::TestsOptions;

/// How a result is reported, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The session failed; the output could not be compared.
    Error,
    /// A broken test that now passes.
    Fixed,
    Ok,
    /// A broken test that still fails.
    Broken,
    Failed,
}

impl Outcome {
    pub fn classify(result: &ExecutionResult) -> Self {
        if result.is_error() {
            Self::Error
        } else if result.success() && result.test.broken {
            Self::Fixed
        } else if result.success() {
            Self::Ok
        } else if result.test.broken {
            Self::Broken
        } else {
            Self::Failed
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Error | Self::Failed => "[XX]",
            Self::Fixed => "[FX]",
            Self::Ok => "[OK]",
            Self::Broken => "[BR]",
        }
    }

    /// Whether errors-only mode still shows this outcome.
    pub fn is_notable(self) -> bool {
        !matches!(self, Self::Ok | Self::Broken)
    }
}

/// Per-outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub ok: usize,
    pub fixed: usize,
    pub broken: usize,
    pub failed: usize,
    pub errors: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: Outcome) {
        let count = match outcome {
            Outcome::Error => &mut self.errors,
            Outcome::Fixed => &mut self.fixed,
            Outcome::Ok => &mut self.ok,
            Outcome::Broken => &mut self.broken,
            Outcome::Failed => &mut self.failed,
        };
        *count += 1;
    }

    pub fn total(&self) -> usize {
        self.ok + self.fixed + self.broken + self.failed + self.errors
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tests: {} ok, {} fixed, {} broken, {} failed, {} errors",
            self.total(),
            self.ok,
            self.fixed,
            self.broken,
            self.failed,
            self.errors
        )
    }
}

/// Writes results to a shared sink, one whole result per write.
pub struct Reporter<W> {
    errors_only: bool,
    debug: bool,
    sink: Mutex<W>,
}

impl<W: Write> Reporter<W> {
    pub fn new(options: &TestsOptions, sink: W) -> Self {
        Self {
            errors_only: options.errors_only,
            debug: options.debug,
            sink: Mutex::new(sink),
        }
    }

    /// Classify and print one result.
    pub fn report(&self, result: &ExecutionResult) -> Outcome {
        let outcome = Outcome::classify(result);
        let text = self.render(result, outcome);
        self.write(&text);
        outcome
    }

    /// Print the closing summary line.
    pub fn finish(&self, summary: &Summary) {
        self.write(&format!("{summary}\n"));
    }

    /// Text for one result; empty when the result is filtered out.
    pub fn render(&self, result: &ExecutionResult, outcome: Outcome) -> String {
        if self.errors_only && !outcome.is_notable() {
            return String::new();
        }

        let test = &result.test;
        let mut text = match outcome {
            Outcome::Error => format!("{} {} something went really wrong.\n", outcome.tag(), test.name),
            _ => format!("{} {}\n", outcome.tag(), test.name),
        };
        match outcome {
            Outcome::Error => {
                if self.debug {
                    text.push_str(&invocation(result));
                    text.push_str(&test.commands.join("; "));
                    text.push('\n');
                }
                push_message(&mut text, result.message());
            }
            Outcome::Failed => {
                if self.debug {
                    text.push_str(&invocation(result));
                }
                push_message(&mut text, result.message());
            }
            Outcome::Fixed | Outcome::Ok | Outcome::Broken => {}
        }
        text
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    fn write(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut sink = self.sink.lock();
        // A closed stdout must not abort the run.
        let _ = sink.write_all(text.as_bytes());
        let _ = sink.flush();
    }
}

fn invocation(result: &ExecutionResult) -> String {
    format!("r2 {} {}\n", result.test.args, result.test.file)
}

fn push_message(text: &mut String, message: &str) {
    text.push_str(message);
    if !message.is_empty() && !message.ends_with('\n') {
        text.push('\n');
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
