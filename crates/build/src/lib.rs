// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compiler for radare2 regression test specifications.
//!
//! Two dialects are understood. The command dialect is a sequence of
//! `KEY=value` directives closed by `RUN`:
//!
//! ```text
//! NAME=entry disasm
//! FILE=../bins/elf/true
//! CMDS=<<EXPECT
//! pd 1
//! EXPECT=<<RUN
//! nop
//! RUN
//! ```
//!
//! Files below an `asm/` directory use the assembler shorthand described
//! in [`asm`].

pub mod asm;
mod compiler;
mod diagnostic;
mod directive;

pub use compiler::{compile, Compiled, Dialect};
pub use diagnostic::{Diagnostic, Issue};
pub use directive::Directive;

use std::path::Path;
use thiserror::Error;

/// Fatal problems reading a specification file.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read and compile a specification file, picking the dialect from its path.
pub fn build_file(path: &Path) -> Result<Compiled, BuildError> {
    let source = std::fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(compile(&source, &Dialect::for_path(path)))
}
