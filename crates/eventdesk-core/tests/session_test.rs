#![allow(clippy::unwrap_used)]
// End-to-end tests for Session, Fetcher and ResetForm against a wiremock
// backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventdesk_core::error::MISSING_TOKEN_MESSAGE;
use eventdesk_core::{
    BearerToken, ClientConfig, CoreError, EventId, FeedbackRow, Fetcher, Notification,
    NotificationLevel, Notifier, RequestState, ResetForm, ResetPhase, Session, View,
    feedback_rows,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn session_for(server: &MockServer, token: Option<&str>) -> Session {
    let mut config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    if let Some(token) = token {
        config = config.with_token(BearerToken::new(token));
    }
    Session::new(config).unwrap()
}

fn recorder() -> (Arc<dyn Notifier>, Arc<Mutex<Vec<Notification>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let notifier: Arc<dyn Notifier> = Arc::new(move |n: Notification| {
        sink.lock().unwrap().push(n);
    });
    (notifier, seen)
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

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_renders_decoded_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .and(header("Authorization", "Bearer t0k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&server)
        .await;

    let session = session_for(&server, Some("t0k"));
    let (notifier, seen) = recorder();
    let fetcher = Fetcher::new("dashboard", "Failed to load dashboard statistics", notifier);
    let mut rx = fetcher.subscribe();

    let s = session.clone();
    let token = session.token().cloned();
    fetcher.trigger(async move { s.fetch_dashboard(token.as_ref()).await });

    let state = rx.wait_for(RequestState::is_settled).await.unwrap().clone();
    let View::Content(stats) = state.view() else {
        panic!("expected content, got {state:?}");
    };
    let values: Vec<u64> = stats.stat_cards().iter().map(|c| c.value).collect();
    assert_eq!(values, vec![42, 1200, 7, 3, 39, 860]);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_without_token_sends_nothing() {
    let server = MockServer::start().await;
    let session = session_for(&server, None);
    let (notifier, seen) = recorder();
    let fetcher = Fetcher::new("dashboard", "Failed to load dashboard statistics", notifier);
    let mut rx = fetcher.subscribe();

    let s = session.clone();
    fetcher.trigger(async move { s.fetch_dashboard(None).await });
    let state = rx.wait_for(RequestState::is_settled).await.unwrap().clone();

    assert_eq!(state, RequestState::Failure(MISSING_TOKEN_MESSAGE.into()));
    assert_eq!(*seen.lock().unwrap(), vec![Notification::error(MISSING_TOKEN_MESSAGE)]);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_token_counts_as_missing() {
    let server = MockServer::start().await;
    let session = session_for(&server, Some("   "));
    assert!(session.token().is_none());

    let err = session.fetch_dashboard(session.token()).await.unwrap_err();
    assert_eq!(err, CoreError::MissingToken);
}

#[tokio::test]
async fn test_dashboard_server_error_has_no_stale_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let session = session_for(&server, Some("t0k"));
    let (notifier, seen) = recorder();
    let fetcher = Fetcher::new("dashboard", "Failed to load dashboard statistics", notifier);

    let mut rx = fetcher.subscribe();
    let s = session.clone();
    fetcher.trigger(async move { s.fetch_dashboard(s.token()).await });
    rx.wait_for(RequestState::is_settled).await.unwrap();
    assert!(fetcher.state().value().is_some());

    let mut rx = fetcher.subscribe();
    let s = session.clone();
    fetcher.trigger(async move { s.fetch_dashboard(s.token()).await });
    let state = rx.wait_for(RequestState::is_settled).await.unwrap().clone();

    assert_eq!(
        state.view(),
        View::Error {
            message: "Failed to load dashboard statistics"
        }
    );
    assert!(state.value().is_none());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_timeout_reports_configured_duration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(stats_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = ClientConfig::new(Url::parse(&server.uri()).unwrap())
        .with_token(BearerToken::new("t0k"));
    config.timeout = Duration::from_secs(1);
    let session = Session::new(config).unwrap();

    let err = session.fetch_dashboard(session.token()).await.unwrap_err();
    assert_eq!(err, CoreError::Timeout { timeout_secs: 1 });
}

// ── Feedback ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_feedback_rows_follow_backend_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/evt-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "2", "userName": "Zoe", "rating": 5, "comment": "Loved it",
              "createdAt": "2024-06-15T10:30:00Z" },
            { "_id": "1", "rating": 2, "comment": "Meh",
              "createdAt": "2024-06-14T10:30:00Z" }
        ])))
        .mount(&server)
        .await;

    let session = session_for(&server, Some("t0k"));
    let event = EventId::parse("evt-9").unwrap();
    let entries = session.fetch_feedback(&event, session.token()).await.unwrap();

    let rows = feedback_rows(&entries);
    assert_eq!(rows.len(), 2);
    let FeedbackRow::Entry(first) = rows[0] else {
        panic!("expected entry row");
    };
    assert_eq!(first.author, "Zoe");
    assert_eq!(first.comment, "Loved it");
    let FeedbackRow::Entry(second) = rows[1] else {
        panic!("expected entry row");
    };
    assert_eq!(second.author, "Anonymous");
}

#[tokio::test]
async fn test_empty_feedback_is_single_placeholder_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/evt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let session = session_for(&server, None);
    let event = EventId::parse("evt-1").unwrap();
    let entries = session.fetch_feedback(&event, None).await.unwrap();

    assert_eq!(feedback_rows(&entries), vec![FeedbackRow::Empty]);
}

#[tokio::test]
async fn test_feedback_shape_mismatch_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/evt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let session = session_for(&server, None);
    let (notifier, seen) = recorder();
    let fetcher = Fetcher::new("feedback", "Failed to load feedback", notifier);
    let mut rx = fetcher.subscribe();

    let s = session.clone();
    let event = EventId::parse("evt-1").unwrap();
    fetcher.trigger(async move { s.fetch_feedback(&event, None).await });
    let state = rx.wait_for(RequestState::is_settled).await.unwrap().clone();

    assert_eq!(state, RequestState::Failure("Failed to load feedback".into()));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_changed_event_id_wins_over_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "_id": "old", "rating": 1, "comment": "",
                                        "createdAt": "2024-01-01T00:00:00Z" }]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feedback/event/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let session = session_for(&server, None);
    let (notifier, _seen) = recorder();
    let fetcher = Fetcher::new("feedback", "Failed to load feedback", notifier);

    for id in ["slow", "fast"] {
        let s = session.clone();
        let event = EventId::parse(id).unwrap();
        fetcher.trigger(async move { s.fetch_feedback(&event, None).await });
    }

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(fetcher.state(), RequestState::Success(Vec::new()));
    assert_eq!(fetcher.generation(), 2);
}

// ── Password reset ──────────────────────────────────────────────────

#[tokio::test]
async fn test_password_reset_success_redirects() {
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

    let session = session_for(&server, None);
    let mut form = ResetForm::new();
    form.set_email("a@b.com");

    let submission = form.submit().unwrap();
    let outcome = session.request_password_reset(submission.email()).await;
    let outcome = form.resolve(submission, outcome);

    assert!(outcome.redirects());
    assert_eq!(outcome.notification().message, "Reset link sent");
    assert_eq!(form.phase(), ResetPhase::Redirected);
}

#[tokio::test]
async fn test_password_reset_failure_shows_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Something went wrong" })),
        )
        .mount(&server)
        .await;

    let session = session_for(&server, None);
    let mut form = ResetForm::new();
    form.set_email("a@b.com");

    let submission = form.submit().unwrap();
    let outcome = session.request_password_reset(submission.email()).await;
    let outcome = form.resolve(submission, outcome);

    assert!(!outcome.redirects());
    assert_eq!(outcome.notification().message, "Something went wrong");
    assert_eq!(form.phase(), ResetPhase::Editing);
    assert_eq!(form.email(), "a@b.com");
}

#[tokio::test]
async fn test_invalid_email_sends_nothing() {
    let server = MockServer::start().await;
    let mut form = ResetForm::new();
    form.set_email("not-an-email");

    assert!(form.submit().is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}
