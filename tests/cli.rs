//! Runs the `lox` binary: exit codes, the stdout/stderr split, and the REPL.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn lox() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lox"));
    command.env_remove("RUST_LOG");
    command
}

fn script(dir: &TempDir, source: &str) -> PathBuf {
    let path = dir.path().join("script.lox");
    fs::write(&path, source).unwrap();
    path
}

fn run_script(source: &str) -> Output {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, source);
    lox().arg(&path).output().unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn script_runs_to_completion() {
    let output = run_script("var a = 1;\na = a + 1;\nprint a;\nprint \"done\";\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stdout), "2\ndone\n");
    assert_eq!(text(&output.stderr), "");
}

#[test]
fn too_many_arguments_is_a_usage_error() {
    let output = lox().args(["a.lox", "b.lox"]).output().unwrap();
    assert_eq!(output.status.code(), Some(64));
    assert_eq!(text(&output.stdout), "");
    assert_eq!(text(&output.stderr), "Usage: lox [script]\n");
}

#[test]
fn syntax_error_exits_65_without_running() {
    let output = run_script("print \"before\";\n1 + ;\nprint 2;\n");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(text(&output.stdout), "");
    assert_eq!(
        text(&output.stderr),
        "[line 2] Error at ';': Expected expression\n"
    );
}

#[test]
fn lexical_error_exits_65() {
    let output = run_script("print 1;\nprint @;\n");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(text(&output.stdout), "");
    assert!(
        text(&output.stderr).starts_with("[line 2] Error: Unexpected character '@'.\n"),
        "{}",
        text(&output.stderr)
    );
}

#[test]
fn overflowing_number_exits_65() {
    let digits = format!("9{}", "9".repeat(320));
    let output = run_script(&format!("print {digits};\n"));
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(text(&output.stdout), "");
    assert!(
        text(&output.stderr).starts_with(&format!(
            "[line 1] Error: Number literal '{digits}' is too large.\n"
        )),
        "{}",
        text(&output.stderr)
    );
}

#[test]
fn missing_script_exits_66() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.lox");
    let output = lox()
        .arg(&path)
        .env("RUST_BACKTRACE", "1")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(66));
    assert_eq!(text(&output.stdout), "");

    let stderr = text(&output.stderr);
    let expected = format!("Error: Failed to read script '{}': ", path.display());
    assert!(stderr.starts_with(&expected), "{stderr}");
    // The cause chain stays on one line and no backtrace is attached.
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(!stderr.contains("backtrace"), "{stderr}");
}

#[test]
fn runtime_error_exits_70_after_earlier_output() {
    let output = run_script("print \"a\";\nprint 1 - \"b\";\nprint \"c\";\n");
    assert_eq!(output.status.code(), Some(70));
    assert_eq!(text(&output.stdout), "a\n");
    assert_eq!(text(&output.stderr), "Operands must be numbers.\n[line 2]\n");
}

#[test]
fn repl_carries_on_after_errors() {
    let mut child = lox()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"var a = 1;\nprint a - \"x\";\nprint ;\na = a + 1;\nprint a;\na\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    // One prompt per line read, plus the final one answered by EOF.
    assert_eq!(text(&output.stdout), "> > > > > 2\n> 2\n> \n");
    assert_eq!(
        text(&output.stderr),
        "Operands must be numbers.\n[line 1]\n[line 1] Error at ';': Expected expression\n"
    );
}
