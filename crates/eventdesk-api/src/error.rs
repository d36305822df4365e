use thiserror::Error;

/// Top-level error type for the `eventdesk-api` crate.
///
/// Covers every failure mode of the REST surface: transport, TLS setup,
/// non-success HTTP status and body decoding. `eventdesk-core` maps these
/// into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The bearer token could not be encoded as an HTTP header value.
    #[error("Invalid bearer token: {message}")]
    InvalidToken { message: String },

    /// The backend rejected the request with 401.
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("token rejected"))]
    Unauthorized { message: Option<String> },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    CannotBeABase(String),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-success HTTP status. `message` is the server-provided text,
    /// taken from the `{ "message": ... }` body when one was sent.
    #[error("Server error (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
