// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite container and its JSON file format.

use crate::TestCase;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors reading or writing a suite file.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode suite: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Which directive dialect produced a suite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteType {
    /// Plain command/expect directives.
    #[default]
    Cmd,
    /// Assembler round-trip shorthand.
    Asm,
}

/// Ordered list of tests plus the dialect they were written in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionSuite {
    #[serde(rename = "type", default)]
    pub kind: SuiteType,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub tests: Vec<TestCase>,
}

impl RegressionSuite {
    pub fn new(kind: SuiteType) -> Self {
        Self {
            kind,
            tests: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Load a suite from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let raw = fs::read(path).map_err(|source| SuiteError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| SuiteError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Render as JSON indented by four spaces.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, SuiteError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    /// Write the suite to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), SuiteError> {
        let bytes = self.to_json_pretty()?;
        fs::write(path, bytes).map_err(|source| SuiteError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TestCase>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<TestCase>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
