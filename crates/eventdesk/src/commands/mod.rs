//! Command dispatch: bridges CLI args -> core Session -> output formatting.

pub mod config_cmd;
pub mod feedback;
pub mod password;
pub mod stats;

use tracing::warn;

use eventdesk_core::{CoreError, Session};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
    profile: &str,
) -> Result<(), CliError> {
    match cmd {
        Command::Stats => stats::handle(session, global, profile).await,
        Command::Feedback(args) => feedback::handle(session, args, global, profile).await,
        Command::ForgotPassword(args) => password::handle(session, args, global, profile).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not need a backend session".into(),
        )),
    }
}

/// Log a failed request and turn it into the CLI error shown to the user.
pub(crate) fn request_failed(err: CoreError, fallback: &str, profile: &str) -> CliError {
    warn!(error = %err, "request failed");
    CliError::from_core(err, fallback, profile)
}

/// Log input rejected before any request went out.
pub(crate) fn refused(err: CoreError, fallback: &str, profile: &str) -> CliError {
    warn!(error = %err, "request not sent");
    CliError::from_core(err, fallback, profile)
}
