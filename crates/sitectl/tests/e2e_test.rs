//! End-to-end tests: the real `sitectl` binary against a wiremock
//! metabase service.
//!
//! The binary is blocking, so each test stands up the mock server on the
//! async test runtime and drives the process from `spawn_blocking`.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

fn sitectl_cmd(server_uri: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sitectl");
    cmd.env("HOME", "/tmp/sitectl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sitectl-test-nonexistent")
        .env_remove("SITECTL_PROFILE")
        .env_remove("SITECTL_MACHINE")
        .env_remove("SITECTL_OUTPUT")
        .env_remove("SITECTL_INSECURE")
        .env_remove("SITECTL_TIMEOUT")
        .env_remove("SITECTL_USERNAME")
        .env_remove("SITECTL_PASSWORD")
        .args(["--server", server_uri]);
    cmd
}

const CHILDREN_PATH: &str = "/metabase/localhost/w3svc/children";

fn children_envelope() -> serde_json::Value {
    json!({
        "status": "ok",
        "data": [
            {
                "name": "1",
                "class": "web-server",
                "properties": { "ServerComment": ["Default Web Site"] }
            },
            {
                "name": "42",
                "class": "web-server",
                "properties": { "ServerComment": ["intranet"] }
            }
        ]
    })
}

async fn mock_children(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CHILDREN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_plain_emits_site_identifiers() {
    let server = MockServer::start().await;
    mock_children(&server, children_envelope()).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        sitectl_cmd(&uri)
            .args(["-o", "plain", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1").and(predicate::str::contains("42")));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn list_json_carries_site_names() {
    let server = MockServer::start().await;
    mock_children(&server, children_envelope()).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let output = sitectl_cmd(&uri)
            .args(["-o", "json", "list"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let parsed: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("valid JSON output");
        let names: Vec<&str> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Default Web Site", "intranet"]);
    })
    .await
    .unwrap();
}

// ── Exists ──────────────────────────────────────────────────────────

#[tokio::test]
async fn exists_reports_true_case_insensitively() {
    let server = MockServer::start().await;
    mock_children(&server, children_envelope()).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        sitectl_cmd(&uri)
            .args(["-o", "plain", "exists", "INTRANET"])
            .assert()
            .success()
            .stdout(predicate::str::contains("true"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn exists_reports_false_with_success_exit() {
    let server = MockServer::start().await;
    mock_children(&server, json!({ "status": "ok", "data": [] })).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        sitectl_cmd(&uri)
            .args(["-o", "plain", "exists", "ghost"])
            .assert()
            .success()
            .stdout(predicate::str::contains("false"));
    })
    .await
    .unwrap();
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_missing_site_exits_not_found() {
    let server = MockServer::start().await;
    mock_children(&server, json!({ "status": "ok", "data": [] })).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let output = sitectl_cmd(&uri)
            .args(["--yes", "delete", "ghost"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(4), "Expected not-found exit code");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("not found"), "stderr: {stderr}");
    })
    .await
    .unwrap();
}

// ── CheckExists through the pipeline entry point ────────────────────

#[tokio::test]
async fn run_check_exists_emits_the_flag() {
    let server = MockServer::start().await;
    mock_children(&server, children_envelope()).await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        sitectl_cmd(&uri)
            .args(["-o", "plain", "run", "--action", "CheckExists", "intranet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("true"));
    })
    .await
    .unwrap();
}

// ── Service-side failures ───────────────────────────────────────────

#[tokio::test]
async fn unauthorized_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHILDREN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let output = sitectl_cmd(&uri).arg("list").output().unwrap();
        assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    })
    .await
    .unwrap();
}
