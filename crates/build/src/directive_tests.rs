// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

#[parameterized(
    name = { "NAME=pd basic", Directive::Name("pd basic") },
    args = { "ARGS=-n -b 32", Directive::Args("-n -b 32") },
    file = { "FILE=../bins/elf/true", Directive::File("../bins/elf/true") },
    broken = { "BROKEN=1", Directive::Broken("1") },
    expect64 = { "EXPECT64=Zm9vCg==", Directive::Expect64("Zm9vCg==") },
    expect_quoted = { "EXPECT='", Directive::ExpectQuoted("") },
    expect = { "EXPECT=nop", Directive::Expect("nop") },
    cmds64 = { "CMDS64=cGQgMQ==", Directive::Cmds64("cGQgMQ==") },
    cmds_quoted = { "CMDS='pd 1", Directive::CmdsQuoted("pd 1") },
    cmds = { "CMDS=pd 1", Directive::Cmds("pd 1") },
)]
fn parses_each_key(line: &str, expected: Directive<'static>) {
    assert_eq!(Directive::parse(line), Some(expected));
}

#[parameterized(
    lowercase = { "name=foo" },
    no_equals = { "NAME foo" },
    run = { "RUN" },
    empty = { "" },
    leading_space = { " NAME=foo" },
)]
fn rejects_unknown_lines(line: &str) {
    assert_eq!(Directive::parse(line), None);
}

#[parameterized(
    none = { "bins/elf/true", "bins/elf/true" },
    one = { "../bins/elf/true", "bins/elf/true" },
    many = { "../../../bins/elf/true", "bins/elf/true" },
    inner_kept = { "bins/../elf", "bins/../elf" },
    dash = { "-", "-" },
)]
fn strips_leading_parent_dirs(input: &str, expected: &str) {
    assert_eq!(strip_parent_dirs(input), expected);
}

#[parameterized(
    one = { "1", true },
    zero = { "0", false },
    two = { "2", false },
    empty = { "", false },
    word = { "yes", false },
    leading_space = { " 1", false },
    trailing_space = { "1 ", false },
)]
fn broken_only_for_one(value: &str, expected: bool) {
    assert_eq!(parse_broken(value), expected);
}

#[test]
fn split_commands_drops_only_trailing_empty() {
    assert_eq!(split_commands("pd 1\npi 2\n"), vec!["pd 1", "pi 2"]);
    assert_eq!(split_commands("pd 1\n\npi 2"), vec!["pd 1", "", "pi 2"]);
    assert!(split_commands("").is_empty());
}

#[test]
fn expect64_decodes_exactly() {
    let mut case = TestCase::default();
    Directive::Expect64("Zm9vCg==").apply(&mut case).unwrap();
    assert_eq!(case.expected, "foo\n");
}

#[test]
fn cmds64_splits_decoded_lines() {
    // "pd 1\npi 1\n"
    let mut case = TestCase::default();
    Directive::Cmds64("cGQgMQpwaSAxCg==").apply(&mut case).unwrap();
    assert_eq!(case.commands, vec!["pd 1", "pi 1"]);
}

#[test]
fn bad_base64_yields_empty_content_and_issue() {
    let mut case = TestCase {
        expected: "stale".to_string(),
        ..Default::default()
    };
    let err = Directive::Expect64("%%%").apply(&mut case).unwrap_err();
    assert!(matches!(err, Issue::Base64(_)));
    assert_eq!(case.expected, "");
}

#[test]
fn file_directive_stores_stripped_path() {
    let mut case = TestCase::default();
    Directive::File("../../bins/pe/a.exe").apply(&mut case).unwrap();
    assert_eq!(case.file, "bins/pe/a.exe");
}
