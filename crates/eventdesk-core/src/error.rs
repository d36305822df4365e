// ── Core error types ──
//
// User-facing errors from eventdesk-core. Consumers never see reqwest or
// serde failures directly: the `From<eventdesk_api::Error>` impl sorts
// transport-layer errors into the taxonomy below.
//
//   precondition -- MissingToken, Validation (no request was sent)
//   transport    -- ConnectionFailed, Timeout
//   server       -- Unauthorized, Server (status + optional message)
//   shape        -- Decode (response did not match the schema)

use thiserror::Error;

/// Shown when a fetch needs a token and none was configured.
pub const MISSING_TOKEN_MESSAGE: &str = "Authentication token not found. Please sign in again.";

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    // ── Precondition errors ──────────────────────────────────────────
    #[error("No authentication token available")]
    MissingToken,

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Server errors ────────────────────────────────────────────────
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("token rejected"))]
    Unauthorized { message: Option<String> },

    #[error("Server error (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Unexpected response shape: {message}")]
    Decode { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether this failure was detected before any request went out.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Validation { .. })
    }

    /// The text shown to the user for this failure.
    ///
    /// Server-provided messages are passed through verbatim. Transport and
    /// shape failures use the operation's `fallback`; their details only go
    /// to the log.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::MissingToken => MISSING_TOKEN_MESSAGE.to_owned(),
            Self::Validation { message, .. } => message.clone(),
            Self::Unauthorized { message: Some(m) } | Self::Server { message: Some(m), .. } => {
                m.clone()
            }
            _ => fallback.to_owned(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<eventdesk_api::Error> for CoreError {
    fn from(err: eventdesk_api::Error) -> Self {
        match err {
            eventdesk_api::Error::InvalidToken { message } => CoreError::Config { message },
            eventdesk_api::Error::Unauthorized { message } => CoreError::Unauthorized { message },
            eventdesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_decode() {
                    CoreError::Decode {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            eventdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            eventdesk_api::Error::CannotBeABase(url) => CoreError::Config {
                message: format!("URL cannot be used as an API base: {url}"),
            },
            eventdesk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            eventdesk_api::Error::Status { status, message } => {
                CoreError::Server { status, message }
            }
            eventdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
