// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::path::PathBuf;
use tempfile::TempDir;
use yare::parameterized;

const FAKE_TOOL: &str = r#"
import os, sys
target = sys.argv[-1]
if target not in ("-q0", "-") and not os.path.exists(target):
    sys.exit(1)
out = sys.stdout.buffer
out.write(b"banner\0")
out.flush()
for line in sys.stdin:
    cmd = line.rstrip("\n")
    if cmd == "q!":
        sys.exit(0)
    if cmd == "die":
        sys.exit(0)
    if cmd.startswith("echo "):
        out.write(cmd[5:].encode() + b"\n")
    elif cmd.startswith("printf "):
        out.write(cmd[7:].encode())
    elif cmd == "q":
        out.write(b"quit was forwarded\n")
    out.write(b"\0")
    out.flush()
"#;

/// Fake tool script; runs as `python3 <script> -q0 <file>`.
struct FakeTool {
    _dir: TempDir,
    script: String,
}

fn fake_tool() -> FakeTool {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake_r2.py");
    std::fs::write(&path, FAKE_TOOL).unwrap();
    FakeTool {
        script: path.display().to_string(),
        _dir: dir,
    }
}

fn python() -> PipeConfig {
    PipeConfig {
        program: PathBuf::from("python3"),
        inherit_stderr: false,
        ..PipeConfig::default()
    }
}

fn case(tool: &FakeTool, file: &str, commands: &[&str], expected: &str) -> TestCase {
    TestCase {
        name: "case".to_string(),
        file: file.to_string(),
        args: tool.script.clone(),
        commands: commands.iter().map(|c| c.to_string()).collect(),
        expected: expected.to_string(),
        broken: false,
    }
}

mod run {
    use super::*;

    #[tokio::test]
    async fn matching_output_passes() {
        let tool = fake_tool();
        let test = case(&tool, "-", &["echo nop", "echo ret"], "nop\nret\n");
        let result = run_test(test.clone(), &python()).await;
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.test, test);
        assert_eq!(result.message(), "");
    }

    #[tokio::test]
    async fn one_missing_newline_is_tolerated() {
        let tool = fake_tool();
        let test = case(&tool, "-", &["printf nop"], "nop\n");
        assert!(run_test(test, &python()).await.success());
    }

    #[tokio::test]
    async fn one_byte_difference_is_a_mismatch() {
        let tool = fake_tool();
        let test = case(&tool, "-", &["echo b801000001"], "b801000000\n");
        let result = run_test(test, &python()).await;
        assert!(!result.success());
        assert!(!result.is_error());
        assert!(result.message().contains("-b801000000"));
        assert!(result.message().contains("+b801000001"));
    }

    #[tokio::test]
    async fn quit_command_is_skipped() {
        let tool = fake_tool();
        let test = case(&tool, "-", &["echo a", "q", "echo b"], "a\nb\n");
        assert!(run_test(test, &python()).await.success());
    }

    #[tokio::test]
    async fn no_commands_compares_empty_output() {
        let tool = fake_tool();
        assert!(run_test(case(&tool, "-", &[], ""), &python()).await.success());
        assert!(!run_test(case(&tool, "-", &[], "x\n"), &python()).await.success());
    }

    #[tokio::test]
    async fn existing_target_file_is_opened() {
        let tool = fake_tool();
        let test = case(&tool, &tool.script, &["echo ok"], "ok\n");
        assert!(run_test(test, &python()).await.success());
    }

    #[tokio::test]
    async fn missing_target_file_is_a_hard_error() {
        let tool = fake_tool();
        let test = case(&tool, "/nonexistent/bins/true", &["echo x"], "x\n");
        let result = run_test(test, &python()).await;
        assert!(result.is_error());
        assert_eq!(
            result.message(),
            "Error: File /nonexistent/bins/true doesn't exist"
        );
    }

    #[tokio::test]
    async fn missing_tool_is_a_hard_error() {
        let tool = fake_tool();
        let config = PipeConfig {
            program: PathBuf::from("/nonexistent/r2"),
            inherit_stderr: false,
            ..PipeConfig::default()
        };
        let result = run_test(case(&tool, "-", &["echo x"], "x\n"), &config).await;
        assert!(result.is_error());
        assert!(result.message().starts_with("Error: failed to spawn"));
    }

    #[tokio::test]
    async fn failing_command_is_a_hard_error() {
        let tool = fake_tool();
        let result = run_test(case(&tool, "-", &["echo a", "die"], "a\n"), &python()).await;
        assert!(result.is_error());
        assert_eq!(result.message(), "Error: process exited unexpectedly");
    }
}

#[parameterized(
    exact = { "nop\n", "nop\n", true },
    missing_newline = { "nop\n", "nop", true },
    two_missing_newlines = { "nop\n\n", "nop", false },
    extra_newline = { "nop", "nop\n", false },
    different_text = { "nop\n", "ret\n", false },
    both_empty = { "", "", true },
)]
fn compare_outputs(expected: &str, actual: &str, passes: bool) {
    let status = compare(expected, actual.to_string());
    assert_eq!(status == Status::Passed, passes);
}

#[parameterized(
    pass = { Status::Passed, false, false },
    mismatch = { Status::Mismatch { diff: String::new() }, false, true },
    error = { Status::Error { message: String::new() }, false, true },
    fixed = { Status::Passed, true, false },
    broken_mismatch = { Status::Mismatch { diff: String::new() }, true, false },
    broken_error = { Status::Error { message: String::new() }, true, false },
)]
fn only_unexpected_failures_fail_the_run(status: Status, broken: bool, fails: bool) {
    let result = ExecutionResult {
        test: TestCase {
            broken,
            ..TestCase::default()
        },
        status,
    };
    assert_eq!(result.fails_run(), fails);
}
