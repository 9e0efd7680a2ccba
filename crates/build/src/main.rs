// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specification builder entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use r2r_build::build_file;
use r2r_suite::output_diagnostic::{print_error, print_warning};

/// Compile a regression test specification into suite JSON
#[derive(Parser, Debug)]
#[command(name = "r2r-build", version)]
struct Args {
    /// Path to the regression test specification
    #[arg(value_name = "path/regression/test")]
    input: PathBuf,

    /// Where to write the suite
    #[arg(value_name = "file.json")]
    output: PathBuf,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(&args.input, &args.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(format_args!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(input: &Path, output: &Path) -> Result<()> {
    if !input.exists() {
        bail!("{} doesn't exist!", input.display());
    }
    println!("TESTS:  {}", input.display());
    println!("OUTPUT: {}", output.display());

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("Open: {file_name}");

    let compiled = build_file(input)?;
    for diagnostic in &compiled.diagnostics {
        print_warning(format_args!("{file_name}: {diagnostic}"));
    }

    compiled
        .suite
        .save(output)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(())
}
