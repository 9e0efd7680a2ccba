// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Non-fatal problems found while compiling a specification.

use std::fmt;
use thiserror::Error;

/// Something the compiler skipped or defaulted. None of these stop a build.
#[derive(Debug, Error)]
pub enum Issue {
    #[error("unknown directive: {0}")]
    UnknownDirective(String),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unknown flag: {0}")]
    UnknownFlag(char),
}

/// An [`Issue`] with the 1-based source line it came from.
#[derive(Debug)]
pub struct Diagnostic {
    pub line: usize,
    pub issue: Issue,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.issue)
    }
}
