// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented compiler from specification text to a suite.

use crate::asm::{self, AsmTarget};
use crate::diagnostic::{Diagnostic, Issue};
use crate::directive::Directive;
use r2r_suite::{RegressionSuite, SuiteType, TestCase};
use std::path::Path;

/// Which grammar a specification file is written in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialect {
    Cmd,
    Asm(AsmTarget),
}

impl Dialect {
    /// Files below an `asm` directory use the assembler shorthand, with
    /// target parameters taken from the file name.
    pub fn for_path(path: &Path) -> Self {
        let in_asm_dir = path
            .parent()
            .is_some_and(|dir| dir.components().any(|c| c.as_os_str() == "asm"));
        if !in_asm_dir {
            return Dialect::Cmd;
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Dialect::Asm(AsmTarget::from_file_name(&file_name))
    }

    pub fn suite_type(&self) -> SuiteType {
        match self {
            Dialect::Cmd => SuiteType::Cmd,
            Dialect::Asm(_) => SuiteType::Asm,
        }
    }
}

/// Output of [`compile`]: the suite plus everything that was skipped.
#[derive(Debug)]
pub struct Compiled {
    pub suite: RegressionSuite,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compile specification text. Never fails: problems become diagnostics and
/// the suite holds whatever could be recovered.
pub fn compile(source: &str, dialect: &Dialect) -> Compiled {
    let mut compiler = Compiler {
        dialect,
        suite: RegressionSuite::new(dialect.suite_type()),
        current: TestCase::default(),
        diagnostics: Vec::new(),
    };
    let mut cursor = Cursor::new(source);

    while let Some((lineno, line)) = cursor.next_line() {
        compiler.line(lineno, line, &mut cursor);
    }

    Compiled {
        suite: compiler.suite,
        diagnostics: compiler.diagnostics,
    }
}

struct Compiler<'d> {
    dialect: &'d Dialect,
    suite: RegressionSuite,
    current: TestCase,
    diagnostics: Vec<Diagnostic>,
}

impl Compiler<'_> {
    fn line(&mut self, lineno: usize, line: &str, cursor: &mut Cursor<'_>) {
        if line == "RUN" {
            let done = std::mem::take(&mut self.current);
            self.suite.tests.push(done);
            return;
        }
        if let Some(rest) = line.strip_prefix("CMDS=<<EXPECT") {
            let block = cursor.heredoc(rest, "EXPECT=");
            self.apply(lineno, Directive::Cmds(&block));
            return;
        }
        if let Some(rest) = line.strip_prefix("EXPECT=<<RUN") {
            let block = cursor.heredoc(rest, "RUN");
            self.apply(lineno, Directive::Expect(&block));
            return;
        }

        let dialect = self.dialect;
        match dialect {
            Dialect::Asm(target) => {
                let mut issues = Vec::new();
                if let Some(case) = asm::parse_line(target, line, &mut issues) {
                    self.suite.tests.push(case);
                }
                self.report(lineno, issues);
            }
            Dialect::Cmd => self.directive(lineno, line, cursor),
        }
    }

    fn directive(&mut self, lineno: usize, line: &str, cursor: &mut Cursor<'_>) {
        if line.is_empty() {
            return;
        }
        match Directive::parse(line) {
            Some(Directive::ExpectQuoted(rest)) => {
                let block = cursor.quoted(rest);
                self.apply(lineno, Directive::Expect(&block));
            }
            Some(Directive::CmdsQuoted(rest)) => {
                let block = cursor.quoted(rest);
                self.apply(lineno, Directive::Cmds(&block));
            }
            Some(directive) => self.apply(lineno, directive),
            None => self.report(lineno, [Issue::UnknownDirective(line.to_string())]),
        }
    }

    fn apply(&mut self, lineno: usize, directive: Directive<'_>) {
        if let Err(issue) = directive.apply(&mut self.current) {
            self.report(lineno, [issue]);
        }
    }

    fn report(&mut self, line: usize, issues: impl IntoIterator<Item = Issue>) {
        self.diagnostics
            .extend(issues.into_iter().map(|issue| Diagnostic { line, issue }));
    }
}

/// Line reader that can hand a heredoc terminator back for reprocessing.
struct Cursor<'s> {
    lines: std::iter::Enumerate<std::str::Lines<'s>>,
    pending: Option<(usize, &'s str)>,
}

impl<'s> Cursor<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            pending: None,
        }
    }

    /// Next `(1-based line number, text)`.
    fn next_line(&mut self) -> Option<(usize, &'s str)> {
        self.pending
            .take()
            .or_else(|| self.lines.next().map(|(idx, line)| (idx + 1, line)))
    }

    /// Collect lines up to one starting with `terminator`. The terminator is
    /// left for the caller's next read.
    fn heredoc(&mut self, first: &str, terminator: &str) -> String {
        let mut block = Block::new(first);
        while let Some((lineno, line)) = self.next_line() {
            if line.starts_with(terminator) {
                self.pending = Some((lineno, line));
                break;
            }
            block.push(line);
        }
        block.finish()
    }

    /// Collect a block up to the next line starting with `'`. A quote at
    /// the end of the opening line is ordinary text.
    fn quoted(&mut self, first: &str) -> String {
        let mut block = Block::new(first);
        while let Some((_, line)) = self.next_line() {
            if line.starts_with('\'') {
                break;
            }
            block.push(line);
        }
        block.finish()
    }
}

/// Newline-joined lines; a non-empty remainder of the opening line counts
/// as the first line.
struct Block(Vec<String>);

impl Block {
    fn new(first: &str) -> Self {
        let mut lines = Vec::new();
        if !first.is_empty() {
            lines.push(first.to_string());
        }
        Self(lines)
    }

    fn push(&mut self, line: &str) {
        self.0.push(line.to_string());
    }

    fn finish(self) -> String {
        self.0.join("\n")
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
