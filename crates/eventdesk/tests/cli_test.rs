//! Integration tests for the `eventdesk` CLI binary.
//!
//! Argument parsing, help output and completions run without a backend;
//! request commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `eventdesk` binary with env isolation.
///
/// Clears all `EVENTDESK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn eventdesk_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("eventdesk");
    cmd.env("HOME", "/tmp/eventdesk-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/eventdesk-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("EVENTDESK_PROFILE")
        .env_remove("EVENTDESK_BASE_URL")
        .env_remove("EVENTDESK_TOKEN")
        .env_remove("EVENTDESK_OUTPUT")
        .env_remove("EVENTDESK_INSECURE")
        .env_remove("EVENTDESK_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stats_body() -> serde_json::Value {
    json!({
        "totalEvents": 42,
        "totalParticipants": 1200,
        "upcomingEvents": 7,
        "pendingEvents": 3,
        "approvedEvents": 39,
        "registeredUsers": 860
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = eventdesk_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    eventdesk_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("stats")
            .and(predicate::str::contains("feedback"))
            .and(predicate::str::contains("forgot-password"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    eventdesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eventdesk"));
}

#[test]
fn test_completions_bash() {
    eventdesk_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_feedback_requires_event_id() {
    let output = eventdesk_cmd().arg("feedback").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_stats_without_backend_is_usage_error() {
    let output = eventdesk_cmd().arg("stats").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No backend configured"), "got:\n{text}");
}

#[test]
fn test_unknown_profile_is_usage_error() {
    let output = eventdesk_cmd()
        .args(["--profile", "nope", "stats"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nope"));
}

#[test]
fn test_profiles_with_no_config() {
    eventdesk_cmd()
        .args(["config", "profiles"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No profiles configured"));
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .and(header("Authorization", "Bearer t0k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&server)
        .await;

    eventdesk_cmd()
        .args(["--base-url", &server.uri(), "--token", "t0k", "stats"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total Events")
                .and(predicate::str::contains("42"))
                .and(predicate::str::contains("Registered Users"))
                .and(predicate::str::contains("860")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_json_matches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&server)
        .await;

    let output = eventdesk_cmd()
        .args(["--base-url", &server.uri(), "--token", "t0k", "-o", "json", "stats"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total_events"], 42);
    assert_eq!(parsed["approved_events"], 39);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_uses_output_from_config_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("eventdesk");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[defaults]\noutput = \"json\"\ntimeout = 90\n",
    )
    .unwrap();

    let output = eventdesk_cmd()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .args(["--base-url", &server.uri(), "--token", "t0k", "stats"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total_events"], 42);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_without_token_sends_nothing() {
    let server = MockServer::start().await;

    let output = eventdesk_cmd()
        .args(["--base-url", &server.uri(), "stats"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(
        combined_output(&output).contains("Authentication token not found. Please sign in again.")
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_server_error_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let output = eventdesk_cmd()
        .args(["--base-url", &server.uri(), "--token", "t0k", "stats"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Failed to load dashboard statistics"));
    assert!(output.stdout.is_empty());
}

// ── Feedback ────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_feedback_empty_shows_placeholder_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/evt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    eventdesk_cmd()
        .args(["--base-url", &server.uri(), "feedback", "evt-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No feedback available for this event"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feedback_rows_in_backend_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/evt-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "b", "user": { "name": "Zoe" }, "rating": 5, "comment": "Loved it",
              "createdAt": "2024-06-15T10:30:00Z" },
            { "_id": "a", "userName": "Adam", "rating": 3.5, "comment": "Crowded",
              "createdAt": "2024-06-14T08:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let output = eventdesk_cmd()
        .args(["--base-url", &server.uri(), "feedback", "evt-2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let zoe = stdout.find("Zoe").unwrap();
    let adam = stdout.find("Adam").unwrap();
    assert!(zoe < adam, "backend order not kept:\n{stdout}");
    assert!(stdout.contains("3.5"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feedback_not_found_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Event not found" })),
        )
        .mount(&server)
        .await;

    let output = eventdesk_cmd()
        .args(["--base-url", &server.uri(), "feedback", "missing"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Event not found"));
}

// ── Password reset ──────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_forgot_password_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .and(body_json(json!({ "email": "a@b.com" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Reset link sent" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    eventdesk_cmd()
        .args(["--base-url", &server.uri(), "forgot-password", "a@b.com"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Reset link sent").and(predicate::str::contains("sign in")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_forgot_password_failure_shows_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Something went wrong" })),
        )
        .mount(&server)
        .await;

    let output = eventdesk_cmd()
        .args(["--base-url", &server.uri(), "forgot-password", "a@b.com"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Something went wrong"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_forgot_password_invalid_email_sends_nothing() {
    let server = MockServer::start().await;

    let output = eventdesk_cmd()
        .args(["--base-url", &server.uri(), "forgot-password", "not-an-email"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("request not sent"));
    assert!(server.received_requests().await.unwrap().is_empty());
}
