//! Password-reset command.

use serde::Serialize;

use eventdesk_core::{RESET_FAILED_FALLBACK, ResetForm, ResetOutcome, Session};

use crate::cli::{ForgotPasswordArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Structured result for `--output json|yaml`.
#[derive(Debug, Serialize)]
struct ResetResult<'a> {
    message: &'a str,
    next: &'static str,
}

pub async fn handle(
    session: &Session,
    args: ForgotPasswordArgs,
    global: &GlobalOpts,
    profile: &str,
) -> Result<(), CliError> {
    let mut form = ResetForm::new();
    form.set_email(args.email);
    let submission = form
        .submit()
        .map_err(|e| super::refused(e, RESET_FAILED_FALLBACK, profile))?;

    let pb = output::spinner(global, "Sending reset link");
    let result = session.request_password_reset(submission.email()).await;
    pb.finish_and_clear();

    let failure = result.as_ref().err().cloned();
    match form.resolve(submission, result) {
        ResetOutcome::RedirectToLogin { notification } => {
            let out = output::render_single(
                global.output(),
                &ResetResult {
                    message: &notification.message,
                    next: "login",
                },
                |_| String::new(),
                |r| r.message.to_owned(),
            )?;
            output::success(global, &notification.message);
            output::hint(global, "Follow the link in the email, then sign in with your new password.");
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ResetOutcome::StayOnForm { notification } => Err(failure.map_or_else(
            || CliError::Internal(notification.message),
            |e| super::request_failed(e, RESET_FAILED_FALLBACK, profile),
        )),
    }
}
