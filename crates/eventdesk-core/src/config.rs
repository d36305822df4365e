// ── Runtime client configuration ──
//
// These types describe *how* to reach the backend. They carry the bearer
// token and connection tuning, but never touch disk. The CLI/TUI builds a
// `ClientConfig` and hands it in.

use std::time::Duration;

use url::Url;

use eventdesk_api::BearerToken;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

/// Configuration for talking to one backend.
///
/// Built by CLI/TUI, passed to [`Session`](crate::Session) -- core never
/// reads config files.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., `https://events.example.com/api`).
    pub base_url: Url,
    /// Bearer token, if one was resolved. Absence is not an error here;
    /// endpoints that need it fail their precondition instead.
    pub token: Option<BearerToken>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: BearerToken) -> Self {
        self.token = if token.is_blank() { None } else { Some(token) };
        self
    }
}
