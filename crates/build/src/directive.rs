// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `KEY=value` directives of the command dialect.

use crate::diagnostic::Issue;
use base64::Engine;
use r2r_suite::TestCase;

/// One recognised directive line.
///
/// Quoted openers only mark where a multi-line block starts; the compiler
/// gathers the block and feeds it back as [`Directive::Expect`] or
/// [`Directive::Cmds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive<'a> {
    Name(&'a str),
    Args(&'a str),
    File(&'a str),
    Broken(&'a str),
    Expect64(&'a str),
    Cmds64(&'a str),
    ExpectQuoted(&'a str),
    CmdsQuoted(&'a str),
    Expect(&'a str),
    Cmds(&'a str),
}

impl<'a> Directive<'a> {
    /// Recognise a directive line. Longer keys are tried before their
    /// prefixes (`EXPECT64=` and `EXPECT='` before `EXPECT=`).
    pub fn parse(line: &'a str) -> Option<Self> {
        let value = |key: &str| line.strip_prefix(key);

        if let Some(v) = value("NAME=") {
            Some(Directive::Name(v))
        } else if let Some(v) = value("ARGS=") {
            Some(Directive::Args(v))
        } else if let Some(v) = value("FILE=") {
            Some(Directive::File(v))
        } else if let Some(v) = value("BROKEN=") {
            Some(Directive::Broken(v))
        } else if let Some(v) = value("EXPECT64=") {
            Some(Directive::Expect64(v))
        } else if let Some(v) = value("EXPECT='") {
            Some(Directive::ExpectQuoted(v))
        } else if let Some(v) = value("EXPECT=") {
            Some(Directive::Expect(v))
        } else if let Some(v) = value("CMDS64=") {
            Some(Directive::Cmds64(v))
        } else if let Some(v) = value("CMDS='") {
            Some(Directive::CmdsQuoted(v))
        } else {
            value("CMDS=").map(Directive::Cmds)
        }
    }

    /// Store a value directive on `case`.
    ///
    /// Quoted openers must be resolved by the caller first; applying one
    /// directly treats its text as a single-line value.
    pub fn apply(self, case: &mut TestCase) -> Result<(), Issue> {
        match self {
            Directive::Name(value) => case.name = value.to_string(),
            Directive::Args(value) => case.args = value.to_string(),
            Directive::File(value) => case.file = strip_parent_dirs(value).to_string(),
            Directive::Broken(value) => case.broken = parse_broken(value),
            Directive::Expect64(value) => match decode64(value) {
                Ok(text) => case.expected = text,
                Err(issue) => {
                    case.expected.clear();
                    return Err(issue);
                }
            },
            Directive::Cmds64(value) => match decode64(value) {
                Ok(text) => case.commands = split_commands(&text),
                Err(issue) => {
                    case.commands.clear();
                    return Err(issue);
                }
            },
            Directive::Expect(value) | Directive::ExpectQuoted(value) => {
                case.expected = value.to_string()
            }
            Directive::Cmds(value) | Directive::CmdsQuoted(value) => {
                case.commands = split_commands(value)
            }
        }
        Ok(())
    }
}

/// `../../bins/x` → `bins/x`.
pub fn strip_parent_dirs(mut path: &str) -> &str {
    while let Some(rest) = path.strip_prefix("../") {
        path = rest;
    }
    path
}

/// Only the integer `1` marks a test broken; surrounding spaces do not parse.
pub fn parse_broken(value: &str) -> bool {
    value.parse::<i64>().is_ok_and(|n| n == 1)
}

/// Commands are newline separated; a trailing newline does not add an
/// empty command.
pub fn split_commands(value: &str) -> Vec<String> {
    let mut commands: Vec<String> = value.split('\n').map(str::to_string).collect();
    if commands.last().is_some_and(|last| last.is_empty()) {
        commands.pop();
    }
    commands
}

fn decode64(encoded: &str) -> Result<String, Issue> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[path = "directive_tests.rs"]
mod tests;
