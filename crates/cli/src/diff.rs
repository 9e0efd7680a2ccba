// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unified diffs between expected and actual tool output.

use similar::TextDiff;

/// Lines of unchanged context around each hunk.
pub const CONTEXT_LINES: usize = 3;

/// Render a line-based unified diff from `expected` to `actual`.
pub fn unified(expected: &str, actual: &str) -> String {
    TextDiff::from_lines(expected, actual)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header("expected", "r2pipe")
        .to_string()
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
