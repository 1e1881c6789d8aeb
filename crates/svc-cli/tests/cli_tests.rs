//! CLI tests against the compiled `svcctl` binary.
//!
//! Every case here fails before the engine touches the host's init system.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn svcctl() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("svcctl"))
}

#[test]
fn test_help() {
    svcctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: svcctl"))
        .stdout(predicate::str::contains("--state"));
}

#[test]
fn test_version() {
    svcctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("svcctl"));
}

#[test]
fn test_missing_name() {
    svcctl().assert().failure().code(2);
}

#[test]
fn test_unknown_state_rejected_by_parser() {
    svcctl()
        .args(["nginx", "--state", "paused"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown state 'paused'"));
}

#[test]
fn test_pattern_short_flag_rejected() {
    svcctl()
        .args(["nginx", "--state", "started", "-p", "nginx"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_empty_name_prints_failure_json() {
    svcctl()
        .arg("")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"failed\":true"))
        .stdout(predicate::str::contains("service name must not be empty"))
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unbalanced_arguments() {
    svcctl()
        .args(["nginx", "--state", "started", "--arguments", "\"oops"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Invalid request: arguments"));
}

#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("absent.toml");

    svcctl()
        .arg("nginx")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("svcctl.toml");
    std::fs::write(&config, "check_mode = \"maybe\"\n").unwrap();

    let output = svcctl()
        .arg("nginx")
        .env("SVCCTL_CONFIG", &config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["failed"], true);
    assert!(report.get("rc").is_none());
}
