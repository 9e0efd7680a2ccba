// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use rstest::rstest;

#[rstest]
#[case("", &[])]
#[case("-a x86", &["-a", "x86"])]
#[case("-a  x86 -b 32", &["-a", "x86", "-b", "32"])]
#[case(" -n ", &["-n"])]
fn arg_list_drops_empty_segments(#[case] args: &str, #[case] expected: &[&str]) {
    let case = TestCase {
        args: args.to_string(),
        ..Default::default()
    };
    assert_eq!(case.arg_list(), expected);
}

#[test]
fn dash_means_no_file() {
    let case = TestCase {
        file: "-".to_string(),
        ..Default::default()
    };
    assert!(case.has_no_file());
    assert!(!TestCase::default().has_no_file());
}

#[test]
fn deserializes_full_record() {
    let json = r#"{
        "name": "pd",
        "file": "bins/elf/true",
        "args": "-n",
        "commands": ["pd 1", "q"],
        "expected": "nop\n",
        "broken": true
    }"#;
    let case: TestCase = serde_json::from_str(json).unwrap();
    assert_eq!(case.name, "pd");
    assert_eq!(case.file, "bins/elf/true");
    assert_eq!(case.args, "-n");
    assert_eq!(case.commands, vec!["pd 1", "q"]);
    assert_eq!(case.expected, "nop\n");
    assert!(case.broken);
}

#[test]
fn missing_fields_take_defaults() {
    let case: TestCase = serde_json::from_str(r#"{"name": "old"}"#).unwrap();
    assert_eq!(case.name, "old");
    assert_eq!(case.args, "");
    assert!(case.commands.is_empty());
    assert!(!case.broken);
}

#[test]
fn null_commands_become_empty() {
    let case: TestCase = serde_json::from_str(r#"{"commands": null}"#).unwrap();
    assert!(case.commands.is_empty());
}

#[test]
fn serializes_fields_in_schema_order() {
    let case = TestCase {
        name: "n".to_string(),
        file: "-".to_string(),
        args: String::new(),
        commands: vec!["pi 1".to_string()],
        expected: "nop\n".to_string(),
        broken: false,
    };
    let json = serde_json::to_string(&case).unwrap();
    assert_eq!(
        json,
        r#"{"name":"n","file":"-","args":"","commands":["pi 1"],"expected":"nop\n","broken":false}"#
    );
}
