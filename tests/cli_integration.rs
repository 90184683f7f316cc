//! CLI integration tests.
//!
//! These verify argument parsing, configuration loading and the `nsu`
//! binary itself.

use std::ffi::OsString;
use std::fs;
use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

use nix_shell_utils::cli::{parse_args_from, Action, Args};
use nix_shell_utils::config::Config;

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("nsu")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

fn nsu() -> Command {
    Command::cargo_bin("nsu").unwrap()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.action.is_none());
    assert!(result.dir.is_none());
    assert!(result.config.is_none());
    assert!(!result.json);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-C",
        "/srv",
        "-q",
        "--no-block",
        "--json",
        "-l",
        "debug",
        "mkdir",
        "a",
        "b",
    ]))
    .unwrap();

    assert_eq!(result.dir.unwrap().to_str().unwrap(), "/srv");
    assert!(result.quiet);
    assert!(result.no_block);
    assert!(result.json);
    assert_eq!(result.log_level, Some("debug".to_string()));
    assert_eq!(
        result.action,
        Some(Action::Mkdir(vec!["a".into(), "b".into()]))
    );
}

#[test]
fn test_cli_missing_option_value() {
    assert!(parse_args_from(args(&["-C"])).is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let json = r#"{
        "shell": { "program": "bash", "flag": "-c" },
        "logging": { "level": "debug" }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.shell.program, "bash");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_config_priority_cli_over_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "logging": { "level": "error" } }"#)
        .unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        log_level: Some("trace".to_string()),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_config_roundtrip() {
    let original = Config::default();
    let json = serde_json::to_string(&original).unwrap();
    let loaded: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(original, loaded);
}

// ============================================================================
// Binary Tests
// ============================================================================

#[test]
fn test_help_exits_zero() {
    nsu()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"));
}

#[test]
fn test_no_command_fails() {
    nsu().assert().failure();
}

#[test]
fn test_unknown_command_fails() {
    nsu()
        .arg("frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn test_run_streams_output() {
    let dir = tempfile::tempdir().unwrap();
    nsu()
        .current_dir(dir.path())
        .args(["run", "echo", "streamed"])
        .assert()
        .success()
        .stdout("streamed\n");
}

#[test]
fn test_run_failure_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    nsu()
        .current_dir(dir.path())
        .args(["run", "exit 5"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("command failed"));
}

#[test]
fn test_run_no_block_reports_code() {
    let dir = tempfile::tempdir().unwrap();
    nsu()
        .current_dir(dir.path())
        .args(["--no-block", "-q", "run", "echo out; exit 3"])
        .assert()
        .code(3)
        .stdout("out\n");
}

#[test]
fn test_run_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = nsu()
        .current_dir(dir.path())
        .args(["--json", "run", "echo X"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stdout"], "X\n");
    assert_eq!(json["stderr"], "");
    assert_eq!(json["exit_code"], 0);
}

#[test]
fn test_mkdir_and_bglob_with_dir_option() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    nsu()
        .args(["-C", root, "mkdir", "one/two", "three"])
        .assert()
        .success();
    assert!(dir.path().join("one/two").is_dir());
    assert!(dir.path().join("three").is_dir());

    fs::write(dir.path().join("three/notes.md"), "").unwrap();
    nsu()
        .args(["-C", root, "bglob", "three/*.md"])
        .assert()
        .success()
        .stdout("notes.md\n");
}

#[test]
fn test_dir_option_is_silent_at_default_level() {
    let dir = tempfile::tempdir().unwrap();
    nsu()
        .env_remove("RUST_LOG")
        .env_remove("NSU_LOG_LEVEL")
        .args(["-C", dir.path().to_str().unwrap(), "run", "true"])
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_missing_dir_option_fails() {
    nsu()
        .args(["-C", "/no/such/dir/for/nsu", "run", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path not found"));
}

#[test]
fn test_pure_helpers() {
    nsu()
        .args(["stem", "/home/foo/foo.py.old"])
        .assert()
        .success()
        .stdout("foo\n");
    nsu()
        .args(["pjoin", "/home/foo/", "bar", "a.txt"])
        .assert()
        .success()
        .stdout("/home/foo/bar/a.txt\n");
    nsu()
        .args(["basename", "/home/foo/"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_sed_in_place() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("pyproject.toml"), "version = \"0.1.0\"\n").unwrap();

    nsu()
        .current_dir(dir.path())
        .args(["sed", "s/0\\.1\\.0/0.2.0/", "pyproject.toml"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("pyproject.toml")).unwrap(),
        "version = \"0.2.0\"\n"
    );
}
