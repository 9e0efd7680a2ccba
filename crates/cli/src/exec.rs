// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Running a single test case against its own protocol session.

use std::path::Path;

use r2r_suite::TestCase;
use tracing::debug;

use crate::diff;
use crate::pipe::{Pipe, PipeConfig, PipeError};

/// Command that would end the session early; never forwarded.
const QUIT: &str = "q";

/// What happened to one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Output matched.
    Passed,
    /// Output differed; carries the unified diff.
    Mismatch { diff: String },
    /// The session could not be started or a command failed.
    Error { message: String },
}

/// A test case together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub test: TestCase,
    pub status: Status,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        matches!(self.status, Status::Passed)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, Status::Error { .. })
    }

    /// Diff text or diagnostic; empty on success.
    pub fn message(&self) -> &str {
        match &self.status {
            Status::Passed => "",
            Status::Mismatch { diff } => diff,
            Status::Error { message } => message,
        }
    }

    /// Whether this result makes the whole run fail.
    pub fn fails_run(&self) -> bool {
        !self.success() && !self.test.broken
    }
}

/// Open a session for `test`, run its commands and compare the output.
///
/// The session is closed whatever the outcome.
pub async fn run_test(test: TestCase, config: &PipeConfig) -> ExecutionResult {
    let status = match Pipe::open(config, &test.arg_list(), &test.file).await {
        Ok(mut pipe) => {
            let status = run_commands(&mut pipe, &test).await;
            if let Err(e) = pipe.close().await {
                debug!(test = %test.name, error = %e, "closing session failed");
            }
            status
        }
        Err(e) => Status::Error {
            message: startup_failure(&test, &e),
        },
    };
    ExecutionResult { test, status }
}

async fn run_commands(pipe: &mut Pipe, test: &TestCase) -> Status {
    let mut actual = String::new();
    for command in test.commands.iter().filter(|c| c.as_str() != QUIT) {
        match pipe.cmd(command).await {
            Ok(output) => actual.push_str(&output),
            Err(e) => {
                return Status::Error {
                    message: format!("Error: {e}"),
                }
            }
        }
    }
    compare(&test.expected, actual)
}

/// Compare output, tolerating one missing trailing newline.
pub fn compare(expected: &str, mut actual: String) -> Status {
    if actual.len() < expected.len() {
        actual.push('\n');
    }
    if actual == expected {
        Status::Passed
    } else {
        Status::Mismatch {
            diff: diff::unified(expected, &actual),
        }
    }
}

fn startup_failure(test: &TestCase, error: &PipeError) -> String {
    if !test.has_no_file() && !test.file.is_empty() && !Path::new(&test.file).exists() {
        format!("Error: File {} doesn't exist", test.file)
    } else {
        format!("Error: {error}")
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
