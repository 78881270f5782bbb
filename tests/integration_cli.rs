// envblock: Child Process Environment Preparation
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `envblock` binary.
//!
//! Each test runs the binary with `--no-default-config` so an
//! `envblock.toml` in the working directory cannot leak in.

use std::io::Write;
use std::process::{Command, Output};

fn envblock(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envblock"))
        .arg("--no-default-config")
        .args(args)
        .env_remove("ENVBLOCK_TEST_UNSET")
        .env_remove("INTERCEPT_REPORT_COMMAND")
        .output()
        .expect("failed to run envblock")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// set
// =============================================================================

#[test]
fn cli_set_on_empty() {
    let output = envblock(&["set", "--empty", "FOO=bar"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "FOO=bar\n");
}

#[test]
fn cli_set_replaces_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "PATH=/bin").unwrap();
    writeln!(file, "HOME=/root").unwrap();
    let path = file.path().to_str().unwrap();

    let output = envblock(&["set", "--from", path, "HOME=/home/x"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "PATH=/bin\nHOME=/home/x\n");
}

#[test]
fn cli_set_null_and_json_formats() {
    let output = envblock(&["set", "--empty", "-f", "null", "A=1", "B=2"]);
    assert_eq!(output.stdout, b"A=1\0B=2\0");

    let output = envblock(&["set", "--empty", "--format", "json", "A=1"]);
    let parsed: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, ["A=1"]);
}

#[test]
fn cli_set_multiline_value_needs_null_or_json() {
    let output = envblock(&["set", "--empty", "A=x\nB=evil"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("--format null"));

    let output = envblock(&["set", "--empty", "-f", "null", "A=x\nB=evil"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"A=x\nB=evil\0");
}

#[test]
fn cli_set_inherits_current_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_envblock"))
        .args(["--no-default-config", "set", "EXTRA=1"])
        .env("MARKER_FOR_ENVBLOCK_TEST", "present")
        .output()
        .unwrap();
    let out = stdout(&output);
    assert!(out.lines().any(|l| l == "MARKER_FOR_ENVBLOCK_TEST=present"));
    assert_eq!(out.lines().last(), Some("EXTRA=1"));
}

#[test]
fn cli_set_copy_missing_value_aborts() {
    let output = envblock(&["set", "--empty", "--copy", "ENVBLOCK_TEST_UNSET"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no array may be printed");
    assert!(
        stderr(&output).contains("fatal: required value for 'ENVBLOCK_TEST_UNSET' is missing"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn cli_fatal_diagnostic_is_plain_and_printed_once() {
    let output = envblock(&["-l", "5", "set", "--empty", "--copy", "ENVBLOCK_TEST_UNSET"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(!err.contains('\u{1b}'), "stderr: {err:?}");
    assert_eq!(err.matches("ENVBLOCK_TEST_UNSET' is missing").count(), 1, "stderr: {err}");
}

#[test]
fn cli_set_incomplete_session_aborts() {
    let output = Command::new(env!("CARGO_BIN_EXE_envblock"))
        .args(["--no-default-config", "set", "--empty", "--session"])
        .env("INTERCEPT_LIBRARY", "/lib/libexec.so")
        .env_remove("INTERCEPT_REPORT_COMMAND")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("INTERCEPT_REPORT_COMMAND"));
}

#[test]
fn cli_set_malformed_assignment_fails() {
    let output = envblock(&["set", "--empty", "NOEQUALS"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error: malformed entry 'NOEQUALS'"));
}

// =============================================================================
// get / session / misc
// =============================================================================

#[test]
fn cli_get_value_and_missing_key() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"A=1\0B=x=y\0").unwrap();
    let path = file.path().to_str().unwrap();

    let output = envblock(&["get", "--from", path, "B"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "x=y\n");

    let output = envblock(&["get", "--from", path, "C"]);
    assert!(!output.status.success());
}

#[test]
fn cli_session_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "INTERCEPT_LIBRARY=/lib.so").unwrap();
    let path = file.path().to_str().unwrap();

    let output = envblock(&["session", "--from", path, "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["library"], "/lib.so");
    assert!(value["reporter"].is_null());
    assert_eq!(value["verbose"], false);
}

#[test]
fn cli_version() {
    let output = envblock(&["version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn cli_no_command_fails() {
    let output = envblock(&[]);
    assert!(!output.status.success());
}
