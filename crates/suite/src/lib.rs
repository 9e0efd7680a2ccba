// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Regression suite records.
//!
//! A [`RegressionSuite`] is what `r2r-build` compiles out of a test
//! specification file and what the `r2r` runner executes. Both sides agree
//! on the JSON layout defined here.

mod case;
pub mod output_diagnostic;
mod suite;

pub use case::{TestCase, NO_FILE};
pub use suite::{RegressionSuite, SuiteError, SuiteType};
