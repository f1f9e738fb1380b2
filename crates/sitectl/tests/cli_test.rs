//! Integration tests for the `sitectl` binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live metabase service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `sitectl` binary with env isolation.
///
/// Clears all `SITECTL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn sitectl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sitectl");
    cmd.env("HOME", "/tmp/sitectl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sitectl-test-nonexistent")
        .env_remove("SITECTL_PROFILE")
        .env_remove("SITECTL_SERVER")
        .env_remove("SITECTL_MACHINE")
        .env_remove("SITECTL_OUTPUT")
        .env_remove("SITECTL_INSECURE")
        .env_remove("SITECTL_TIMEOUT")
        .env_remove("SITECTL_USERNAME")
        .env_remove("SITECTL_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = sitectl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("Usage"),
        "Expected 'Usage' in output:\n{text}"
    );
}

#[test]
fn test_help_flag() {
    sitectl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("web-server sites")
            .and(predicate::str::contains("create"))
            .and(predicate::str::contains("delete"))
            .and(predicate::str::contains("exists")),
    );
}

#[test]
fn test_version_flag() {
    sitectl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitectl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    sitectl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    sitectl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    sitectl_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = sitectl_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_list_without_server_config() {
    let output = sitectl_cmd().arg("list").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure without a configured server"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("config"),
        "Expected a pointer to configuration:\n{text}"
    );
}

#[test]
fn test_run_rejects_unknown_action_as_usage_error() {
    let output = sitectl_cmd()
        .args([
            "--server",
            "http://127.0.0.1:9",
            "run",
            "--action",
            "Recycle",
            "somesite",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("Invalid task action") && text.contains("Recycle"),
        "Expected invalid-action diagnostic:\n{text}"
    );
}

#[test]
fn test_run_lists_the_valid_vocabulary_in_help() {
    let output = sitectl_cmd()
        .args([
            "--server",
            "http://127.0.0.1:9",
            "run",
            "--action",
            "bogus",
            "somesite",
        ])
        .output()
        .unwrap();

    let text = combined_output(&output);
    assert!(
        text.contains("CheckExists") && text.contains("Continue"),
        "Expected the action vocabulary in help text:\n{text}"
    );
}

#[test]
fn test_delete_requires_name() {
    sitectl_cmd().arg("delete").assert().failure();
}
