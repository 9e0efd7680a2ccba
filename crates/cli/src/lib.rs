// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! radare2 regression test runner
//!
//! Loads a suite compiled by `r2r-build`, runs every test case against its
//! own `r2 -q0` session across a bounded pool of workers, and reports each
//! outcome with a unified diff when the output does not match.

pub mod cli;
pub mod diff;
pub mod exec;
pub mod options;
pub mod pipe;
pub mod pool;
pub mod report;
