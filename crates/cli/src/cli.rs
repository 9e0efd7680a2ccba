// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runner command line.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::options::{default_jobs, TestsOptions};

/// Run a radare2 regression suite
#[derive(Parser, Debug, Clone)]
#[command(name = "r2r", version, about = "Run a radare2 regression suite")]
pub struct Cli {
    /// Number of tests to run at once [default: number of CPUs]
    #[arg(long, value_name = "n")]
    pub jobs: Option<NonZeroUsize>,

    /// Change to this directory before loading the suite
    #[arg(long, value_name = "dir")]
    pub wdir: Option<PathBuf>,

    /// Show invocations and the tool's stderr
    #[arg(long)]
    pub debug: bool,

    /// Report each test as soon as it finishes
    #[arg(long)]
    pub seq: bool,

    /// Only report failures and errors
    #[arg(long)]
    pub errors_only: bool,

    /// radare2 binary to test
    #[arg(long, value_name = "path", env = "R2R_BIN", default_value = "r2")]
    pub r2: PathBuf,

    /// Suite produced by r2r-build
    #[arg(value_name = "file.json")]
    pub suite: PathBuf,
}

impl From<&Cli> for TestsOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            jobs: cli.jobs.unwrap_or_else(default_jobs),
            sequence: cli.seq,
            errors_only: cli.errors_only,
            debug: cli.debug,
            r2: cli.r2.clone(),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
