// ── Session ──
//
// The one place front-ends go for remote data. Wraps an `ApiClient`, maps
// wire types into the domain model and api errors into `CoreError`. The
// bearer token is always an explicit argument; `Session` only remembers
// the configured one so callers can hand it back in.

use std::sync::Arc;

use tracing::{debug, info};

use eventdesk_api::{ApiClient, BearerToken, TlsMode, TransportConfig};

use crate::config::{ClientConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{DashboardStats, EventId, FeedbackEntry};

/// Generic failure text for the dashboard view.
pub const DASHBOARD_FALLBACK: &str = "Failed to load dashboard statistics";
/// Generic failure text for the feedback view.
pub const FEEDBACK_FALLBACK: &str = "Failed to load feedback";

/// Fetch entry point shared by all views.
///
/// Cheaply cloneable via `Arc<SessionInner>`.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    config: ClientConfig,
    client: ApiClient,
}

impl Session {
    /// Build the HTTP client for `config`. No request is sent.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = ApiClient::new(config.base_url.as_str(), &transport)?;
        debug!(base_url = %client.base_url(), "session created");
        Ok(Self {
            inner: Arc::new(SessionInner { config, client }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The token resolved from configuration, if any.
    pub fn token(&self) -> Option<&BearerToken> {
        self.inner.config.token.as_ref()
    }

    // ── Dashboard ────────────────────────────────────────────────────

    /// Dashboard counters. Without a token this fails with
    /// [`CoreError::MissingToken`] and sends nothing.
    pub async fn fetch_dashboard(
        &self,
        token: Option<&BearerToken>,
    ) -> Result<DashboardStats, CoreError> {
        let Some(token) = token else {
            info!("dashboard fetch skipped: no token");
            return Err(CoreError::MissingToken);
        };
        let raw = self
            .inner
            .client
            .dashboard_stats(token)
            .await
            .map_err(|e| self.map_error(e))?;
        Ok(raw.into())
    }

    // ── Feedback ─────────────────────────────────────────────────────

    /// Feedback for one event, in backend order.
    pub async fn fetch_feedback(
        &self,
        event_id: &EventId,
        token: Option<&BearerToken>,
    ) -> Result<Vec<FeedbackEntry>, CoreError> {
        let raw = self
            .inner
            .client
            .event_feedback(event_id.as_str(), token)
            .await
            .map_err(|e| self.map_error(e))?;
        Ok(raw.into_iter().map(FeedbackEntry::from).collect())
    }

    // ── Account ──────────────────────────────────────────────────────

    /// Ask for a reset link. `Ok` carries the backend's confirmation
    /// message, if it sent one.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>, CoreError> {
        let resp = self
            .inner
            .client
            .forgot_password(email)
            .await
            .map_err(|e| self.map_error(e))?;
        Ok(resp.message)
    }

    fn map_error(&self, err: eventdesk_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.inner.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}

/// Build a [`TransportConfig`] from the client configuration.
fn build_transport(config: &ClientConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
