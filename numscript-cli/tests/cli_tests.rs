//! Integration tests for the NumScript CLI.
//!
//! These tests invoke the `numscript` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn numscript() -> Command {
    Command::cargo_bin("numscript").unwrap()
}

/// Return the workspace root (parent of numscript-cli/).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Return the absolute path to a sample script.
fn test_program(name: &str) -> PathBuf {
    workspace_root().join("tests/programs").join(name)
}

/// Helper: write script text to a temp file and return its path.
fn write_script(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("script.ns");
    fs::write(&path, text).unwrap();
    path
}

// ---- run ----

#[test]
fn run_hello() {
    numscript()
        .arg("run")
        .arg(test_program("hello.ns"))
        .assert()
        .success()
        .stdout("hello\nProgram finished with status code 0\n");
}

#[test]
fn run_countdown() {
    numscript()
        .arg("run")
        .arg(test_program("countdown.ns"))
        .assert()
        .success()
        .stdout("3\n2\n1\nProgram finished with status code 0\n");
}

#[test]
fn run_exit_status_becomes_exit_code() {
    numscript()
        .arg("run")
        .arg(test_program("status.ns"))
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Program finished with status code 3"));
}

#[test]
fn run_echo_reads_stdin() {
    numscript()
        .arg("run")
        .arg(test_program("echo.ns"))
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout("abc\nProgram finished with status code 0\n");
}

#[test]
fn run_echo_end_of_input() {
    numscript()
        .arg("run")
        .arg(test_program("echo.ns"))
        .write_stdin("")
        .assert()
        .code(254)
        .stdout("Program finished with status code -2\n");
}

#[test]
fn run_echo_invalid_utf8_is_invalid_input() {
    numscript()
        .arg("run")
        .arg(test_program("echo.ns"))
        .write_stdin(&b"\xff\xfe\n"[..])
        .assert()
        .code(255)
        .stdout("Program finished with status code -1\n")
        .stderr(predicate::str::contains("runtime error").not());
}

#[test]
fn run_status_multiple_of_256_still_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "5 0 256\n");
    numscript()
        .arg("run")
        .arg(&path)
        .assert()
        .code(255)
        .stdout("Program finished with status code 256\n");
}

#[test]
fn run_end_of_script_is_status_zero() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "6\n\n8 0 7\n");
    numscript()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout("7\nProgram finished with status code 0\n");
}

#[test]
fn run_runtime_error() {
    numscript()
        .arg("run")
        .arg(test_program("failing.ns"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("runtime error"))
        .stderr(predicate::str::contains("symbol 5 not found on line 2"));
}

#[test]
fn run_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "99 1\n");
    numscript()
        .arg("run")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid operation code 99"));
}

#[test]
fn run_invalid_token() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "5 0 0\n8 zero\n");
    numscript()
        .arg("run")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2: invalid token 'zero'"));
}

#[test]
fn run_missing_file() {
    numscript()
        .args(["run", "/nonexistent/script.ns"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_scoped_calls_releases_label_locals() {
    // Root @0 is the defining flag; each call declares its own @0.
    let dir = TempDir::new().unwrap();
    let path = write_script(
        &dir,
        "0 0 0 1\n\
         2 1\n\
         11 3 0 2\n\
         0 0 0 9\n\
         8 2 0\n\
         4\n\
         2 2\n\
         1 0 0 0\n\
         3 1\n\
         3 1\n\
         5 0 0\n",
    );
    numscript()
        .args(["run", "--scoped-calls"])
        .arg(&path)
        .assert()
        .success()
        .stdout("9\n9\nProgram finished with status code 0\n");
}

// ---- list ----

#[test]
fn list_shows_mnemonics() {
    numscript()
        .arg("list")
        .arg(test_program("hello.ns"))
        .assert()
        .success()
        .stdout(predicate::str::contains("DECLARE_LOCAL @0 [104 101 108 108 111]"))
        .stdout(predicate::str::contains("PRINT_STRING @0"))
        .stdout(predicate::str::contains("EXIT 0"));
}

#[test]
fn list_reports_malformed_statements() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "6\n5 0\n");
    numscript()
        .arg("list")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NO_OP"))
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("invalid argument number for operation EXIT"));
}

// ---- encode ----

#[test]
fn encode_prints_codes() {
    numscript()
        .args(["encode", "hi!"])
        .assert()
        .success()
        .stdout("104 105 33\n");
}

// ---- usage ----

#[test]
fn no_args_is_usage_error() {
    numscript()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn tracing_goes_to_stderr() {
    numscript()
        .arg("run")
        .arg(test_program("hello.ns"))
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout("hello\nProgram finished with status code 0\n")
        .stderr(predicate::str::contains("run finished"));
}
