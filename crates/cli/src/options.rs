// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable run configuration shared by every worker.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::pipe::PipeConfig;

/// Settings for one run of a suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestsOptions {
    /// Number of concurrent workers.
    pub jobs: NonZeroUsize,
    /// Report each result as soon as its worker finishes.
    pub sequence: bool,
    /// Only report failures and hard errors.
    pub errors_only: bool,
    /// Print invocation details and pass the tool's stderr through.
    pub debug: bool,
    /// Tool binary.
    pub r2: PathBuf,
}

impl TestsOptions {
    /// How each session launches the tool.
    pub fn pipe_config(&self) -> PipeConfig {
        PipeConfig {
            program: self.r2.clone(),
            inherit_stderr: self.debug,
            ..PipeConfig::default()
        }
    }
}

impl Default for TestsOptions {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            sequence: false,
            errors_only: false,
            debug: false,
            r2: PathBuf::from("r2"),
        }
    }
}

/// One worker per available CPU.
pub fn default_jobs() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
