//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text. The headline of every request failure is the same text a view
//! would show: the server's message when it sent one, the command's
//! generic fallback otherwise.

use miette::Diagnostic;
use thiserror::Error;

use eventdesk_config::ConfigError;
use eventdesk_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

/// Fallback headline for failures outside a specific command.
pub const REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(eventdesk::connection_failed),
        help(
            "Could not reach the backend at {url}: {reason}\n\
             Check the base URL with: eventdesk config show\n\
             Local development backends may need --insecure (-k)."
        )
    )]
    ConnectionFailed {
        message: String,
        url: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(eventdesk::timeout),
        help("No answer after {seconds}s. Increase with --timeout or check the backend.")
    )]
    Timeout { message: String, seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(eventdesk::no_token),
        help(
            "Store a token with: eventdesk config set-token --profile {profile}\n\
             Or pass --token / set EVENTDESK_TOKEN."
        )
    )]
    MissingToken { message: String, profile: String },

    #[error("{message}")]
    #[diagnostic(
        code(eventdesk::auth_failed),
        help(
            "The backend rejected the token.\n\
             Store a fresh one with: eventdesk config set-token --profile {profile}"
        )
    )]
    AuthFailed { message: String, profile: String },

    // ── Server ───────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(eventdesk::not_found), help("The backend answered HTTP 404."))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(eventdesk::server_error), help("The backend answered HTTP {status}."))]
    Server { message: String, status: u16 },

    #[error("{message}")]
    #[diagnostic(
        code(eventdesk::unexpected_response),
        help("The response did not match the expected shape. Re-run with -vv for details.")
    )]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(eventdesk::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(eventdesk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: eventdesk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(eventdesk::no_config),
        help(
            "Create a profile with: eventdesk config init\n\
             Or pass --base-url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(eventdesk::config))]
    Config(#[from] ConfigError),

    // ── Internal ─────────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(code(eventdesk::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(eventdesk::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(eventdesk::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::MissingToken { .. } | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a core failure, using `fallback` as the headline when the
    /// failure carries no displayable message.
    pub fn from_core(err: CoreError, fallback: &str, profile: &str) -> Self {
        let message = err.user_message(fallback);
        match err {
            CoreError::MissingToken => CliError::MissingToken {
                message,
                profile: profile.into(),
            },
            CoreError::Unauthorized { .. } => CliError::AuthFailed {
                message,
                profile: profile.into(),
            },
            CoreError::Validation { field, message } => CliError::Validation {
                field,
                reason: message,
            },
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                message,
                url,
                reason,
            },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                message,
                seconds: timeout_secs,
            },
            CoreError::Server { status: 404, .. } => CliError::NotFound { message },
            CoreError::Server { status, .. } => CliError::Server { message, status },
            CoreError::Decode { .. } => CliError::Decode { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core(err, REQUEST_FAILED, "default")
    }
}
