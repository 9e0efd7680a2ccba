// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Regression runner entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use r2r::cli::Cli;
use r2r::options::TestsOptions;
use r2r::pool::Pool;
use r2r::report::Reporter;
use r2r_suite::output_diagnostic::print_error;
use r2r_suite::RegressionSuite;

#[tokio::main]
async fn main() -> ExitCode {
    // Help and version also land here and exit 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.debug);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            print_error(format_args!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Debug traces with `--debug`; otherwise warnings, unless `RUST_LOG` says more.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<bool> {
    if let Some(dir) = &cli.wdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot change directory to {}", dir.display()))?;
    }

    println!("Executing {}", cli.suite.display());
    let suite = RegressionSuite::load(&cli.suite)?;

    let options = TestsOptions::from(&cli);
    let reporter = Reporter::new(&options, std::io::stdout());
    let pool = Pool::new(options, reporter);

    let report = pool.perform(suite).await;
    pool.reporter().finish(&report.summary);
    Ok(report.success)
}
