use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;

/// The bundled standard-library catalogue
const BUILTINS: &str = "../stubs/go/builtins.go";

fn stubcat_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("stubcat");
    cmd.env("STUBCAT_COLORIZE", "never").env("NO_COLOR", "1");
    cmd
}

fn stdout_of(args: &[&str]) -> String {
    let assert = stubcat_cmd().args(args).assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr_of_failure(args: &[&str]) -> String {
    let assert = stubcat_cmd().args(args).assert().failure();
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

/// Check that "stubcat --version" works correctly
#[test]
fn version_command() {
    let assert = stubcat_cmd().arg("--version").assert();
    assert.success().stdout("stubcat 0.1.0\n");
}

/// Check that "stubcat check" accepts the bundled catalogue
#[test]
fn check_command() {
    let assert = stubcat_cmd().args(["check", BUILTINS]).assert();
    assert.success().stdout("../stubs/go/builtins.go is consistent\n");
}

#[test]
fn check_reports_duplicate_names() {
    let stderr = stderr_of_failure(&["check", "../stubs/invalid/duplicate_print.go"]);
    assert!(stderr.contains("Print is declared more than once in package fmt"), "{stderr}");
    assert!(stderr.contains("C-001"), "{stderr}");
}

#[test]
fn check_reports_missing_receiver() {
    let stderr = stderr_of_failure(&["check", "../stubs/invalid/missing_receiver.go"]);
    assert!(stderr.contains("receiver type File"), "{stderr}");
}

#[test]
fn check_reports_malformed_stub() {
    let stderr = stderr_of_failure(&["check", "../stubs/invalid/malformed.go"]);
    assert!(stderr.contains("P-001"), "{stderr}");
    assert!(stderr.contains("Reader"), "{stderr}");
}

/// Every stub below a directory is loaded, and one failure does not hide the others.
#[test]
fn check_directory() {
    let assert = stubcat_cmd().args(["check", "../stubs"]).assert().failure();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("builtins.go is consistent"), "{stdout}");
    assert!(stderr.contains("3 of 4 stub file(s) failed to load"), "{stderr}");
}

#[test]
fn check_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap();
    let stderr = stderr_of_failure(&["check", path]);
    assert!(stderr.contains("No stub files found"), "{stderr}");
}

#[test]
fn lookup_command() {
    let stdout = stdout_of(&["lookup", BUILTINS, "http", "Client"]);
    assert!(stdout.contains("type Client struct"), "{stdout}");
    assert!(stdout.contains("Timeout time.Duration"), "{stdout}");
}

#[test]
fn lookup_is_exact() {
    let stderr = stderr_of_failure(&["lookup", BUILTINS, "io", "error"]);
    assert!(stderr.contains("Package io has no declaration named error"), "{stderr}");

    let stdout = stdout_of(&["lookup", BUILTINS, "io", "error", "--resolve"]);
    assert!(stdout.contains("type error interface"), "{stdout}");
}

#[test]
fn methods_of_interface() {
    let stdout = stdout_of(&["methods", BUILTINS, "io", "ReadWriteCloser"]);
    let names: Vec<_> =
        stdout.lines().map(|line| line.split('(').next().unwrap_or_default()).collect();
    assert_eq!(names, vec!["Read", "Write", "Close"]);
    assert!(stdout.contains("(from io.Reader)"), "{stdout}");
}

#[test]
fn methods_of_struct() {
    let stdout = stdout_of(&["methods", BUILTINS, "http", "Client"]);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.starts_with("Get(url string) (*Response, error) (pointer receiver)"), "{stdout}");
}

#[test]
fn export_json() {
    let stdout = stdout_of(&["export", BUILTINS, "--format", "json"]);
    assert!(stdout.contains("\"method_sets\""), "{stdout}");
    assert!(stdout.contains("io.ReadWriteCloser"), "{stdout}");
}

#[test]
fn export_dot_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("catalogue.dot");
    stubcat_cmd()
        .args(["export", BUILTINS, "--format", "dot", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout("");
    let dot = fs::read_to_string(out).unwrap();
    assert!(dot.starts_with("digraph"), "{dot}");
}

/// Formatting the bundled catalogue yields a stub that formats to itself.
#[test]
fn fmt_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.go");
    let second = dir.path().join("second.go");
    stubcat_cmd().args(["fmt", BUILTINS, "-o", first.to_str().unwrap()]).assert().success();
    stubcat_cmd()
        .args(["fmt", first.to_str().unwrap(), "-o", second.to_str().unwrap()])
        .assert()
        .success();
    let first = fs::read_to_string(first).unwrap();
    assert!(first.contains("package io"));
    assert_eq!(first, fs::read_to_string(second).unwrap());

    stubcat_cmd().args(["check", dir.path().to_str().unwrap()]).assert().success();
}

/// `fmt` colours its stdout only when STUBCAT_COLORIZE asks for it.
#[test]
fn fmt_honours_colorize_setting() {
    let plain = stdout_of(&["fmt", BUILTINS]);
    assert!(!plain.contains('\u{1b}'), "{plain}");
    assert!(plain.contains("package io"));

    let assert =
        stubcat_cmd().env("STUBCAT_COLORIZE", "always").args(["fmt", BUILTINS]).assert().success();
    let colored = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(colored.contains('\u{1b}'), "{colored}");
}

/// Block comments are skipped, so a stub using them still checks.
#[test]
fn check_accepts_block_comments() {
    let dir = tempfile::tempdir().unwrap();
    let stub = dir.path().join("stub.go");
    fs::write(&stub, "/* builtins */\ntype error error\n\npackage io\n/** Reader */\ntype Reader interface {\n    Read(p []byte /* buffer */) (n int, err error)\n}\n").unwrap();
    stubcat_cmd().args(["check", stub.to_str().unwrap()]).assert().success();
}

#[test]
fn lex_command() {
    let dir = tempfile::tempdir().unwrap();
    let stub = dir.path().join("stub.go");
    fs::write(&stub, "type byte uint8").unwrap();
    let stdout = stdout_of(&["lex", stub.to_str().unwrap()]);
    assert_eq!(stdout, "Type at (0,4)\nIdent(\"byte\") at (5,9)\nIdent(\"uint8\") at (10,15)\n");
}

#[test]
fn gen_completions_command() {
    let stdout = stdout_of(&["gen-completions", "bash"]);
    assert!(stdout.contains("stubcat"));
}
