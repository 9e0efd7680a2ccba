// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assembler round-trip shorthand.
//!
//! A file named `<arch>[_<cpu>]_<bits>` holds one test per line:
//!
//! ```text
//! ad "mov eax, 1" b801000000
//! dB "jmp 0x10" eb0e 0x2
//! ```
//!
//! Flags: `a` assembles the text and expects the hex, `d` disassembles the
//! hex and expects the text, `B` marks the test broken, `E` switches the
//! target to big endian. An optional last token seeks before running.

use crate::diagnostic::Issue;
use r2r_suite::{TestCase, NO_FILE};
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r#"\w+|".+""#).ok());

const DEFAULT_SKIP: &str = "0x0";
const MAX_FLAGS: usize = 3;

/// Target parameters encoded in an assembler test file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsmTarget {
    file_name: String,
    args: Option<String>,
}

impl AsmTarget {
    /// Derive `-a`, `-e asm.cpu=` and `-b` flags from a file name such as
    /// `x86_32` or `arm_cortex_16`.
    pub fn from_file_name(file_name: &str) -> Self {
        let parts: Vec<&str> = file_name.split('_').collect();
        let args = match parts.as_slice() {
            [arch] => Some(format!("-a {arch}")),
            [arch, bits] => Some(format!("-a {arch} -b {bits}")),
            [arch, cpu, bits] => Some(format!("-a {arch} -e asm.cpu={cpu} -b {bits}")),
            _ => None,
        };
        Self {
            file_name: file_name.to_string(),
            args,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Base flags, or `None` when the file name has too many segments.
    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }
}

/// Compile one data line. Returns `None` for lines that do not have the
/// `<flags> "<asm>" <hex> [skip]` shape; unknown flag letters are reported
/// through `issues` and otherwise ignored.
pub fn parse_line(target: &AsmTarget, line: &str, issues: &mut Vec<Issue>) -> Option<TestCase> {
    let base_args = target.args()?;
    let regex = TOKEN_REGEX.as_ref()?;
    let tokens: Vec<&str> = regex.find_iter(line).map(|m| m.as_str()).collect();

    let (flags, quoted, hex) = match tokens.as_slice() {
        [flags, quoted, hex, ..] => (*flags, *quoted, *hex),
        _ => return None,
    };
    // Three flag letters at most; anything longer is prose, not a test line.
    if is_quoted(flags) || flags.len() > MAX_FLAGS || !is_quoted(quoted) || is_quoted(hex) {
        return None;
    }
    let asm = &quoted[1..quoted.len() - 1];
    let skip = match tokens.get(3) {
        Some(token) if is_quoted(token) => return None,
        Some(token) => *token,
        None => DEFAULT_SKIP,
    };

    let mut case = TestCase {
        name: format!("{}: {}", target.file_name(), line),
        file: NO_FILE.to_string(),
        args: base_args.to_string(),
        ..Default::default()
    };
    if skip != DEFAULT_SKIP {
        case.commands.push(format!("s {skip}"));
    }
    for flag in flags.chars() {
        match flag {
            'a' => {
                case.commands.push(format!("pa {asm}"));
                case.expected.push_str(hex);
                case.expected.push('\n');
            }
            'd' => {
                case.commands.push(format!("pad {hex}"));
                case.expected.push_str(asm);
                case.expected.push('\n');
            }
            'B' => case.broken = true,
            'E' => case.args.push_str(" -e cfg.bigendian=true"),
            other => issues.push(Issue::UnknownFlag(other)),
        }
    }
    Some(case)
}

fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

#[cfg(test)]
#[path = "asm_tests.rs"]
mod tests;
