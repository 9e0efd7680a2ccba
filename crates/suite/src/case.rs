// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A single executable test scenario.

use serde::{Deserialize, Deserializer, Serialize};

/// File name meaning "run without loading a target".
pub const NO_FILE: &str = "-";

/// One test: which file to open, which flags to pass, which commands to run
/// and the exact output they are expected to produce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub name: String,

    /// Target file, or `-` for none.
    #[serde(default)]
    pub file: String,

    /// Extra command-line flags, separated by spaces.
    #[serde(default)]
    pub args: String,

    /// Commands in issue order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub commands: Vec<String>,

    /// Concatenated output of all commands.
    #[serde(default)]
    pub expected: String,

    /// Known to fail. Flips how the outcome is reported, not how it runs.
    #[serde(default)]
    pub broken: bool,
}

impl TestCase {
    /// Flags to pass to the tool, with empty segments dropped.
    pub fn arg_list(&self) -> Vec<String> {
        self.args
            .split(' ')
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether this test runs without a target file.
    pub fn has_no_file(&self) -> bool {
        self.file == NO_FILE
    }
}

/// Older suites were written with `"commands": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;
