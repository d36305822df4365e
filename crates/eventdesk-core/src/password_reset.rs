// ── Password-reset submission flow ──
//
// One field, one request. The form owns the input buffer and the phase;
// the request itself runs elsewhere (Session) and its outcome is fed back
// through `resolve`.
//
//   Editing --submit--> Submitting --resolve(ok)--> Redirected
//                            |
//                            +------resolve(err)--> Editing

use crate::error::CoreError;
use crate::notify::Notification;

/// Shown on success when the backend sends no message.
pub const RESET_SENT_FALLBACK: &str = "Password reset link sent. Check your email.";
/// Shown on failure when the backend sends no message.
pub const RESET_FAILED_FALLBACK: &str = "Failed to send reset link";

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetPhase {
    /// Accepting input. Also the state after a failed attempt.
    #[default]
    Editing,
    /// A request is outstanding; further submits are refused.
    Submitting,
    /// The request succeeded; the front-end should show the login view.
    Redirected,
}

/// The value handed to the transport for one attempt. Consumed by
/// [`ResetForm::resolve`], so nothing of the attempt outlives it.
#[derive(Debug, PartialEq, Eq)]
pub struct ResetSubmission {
    email: String,
}

impl ResetSubmission {
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Result of a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Confirmation shown; navigate to the login view.
    RedirectToLogin { notification: Notification },
    /// Error shown; the form stays interactive.
    StayOnForm { notification: Notification },
}

impl ResetOutcome {
    pub fn notification(&self) -> &Notification {
        match self {
            Self::RedirectToLogin { notification } | Self::StayOnForm { notification } => {
                notification
            }
        }
    }

    pub fn redirects(&self) -> bool {
        matches!(self, Self::RedirectToLogin { .. })
    }
}

/// State of the "forgot password" form.
#[derive(Debug, Clone, Default)]
pub struct ResetForm {
    email: String,
    phase: ResetPhase,
    last_error: Option<String>,
}

impl ResetForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phase(&self) -> ResetPhase {
        self.phase
    }

    /// Message of the most recent failure, cleared on the next submit.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a submit would be accepted right now.
    pub fn can_submit(&self) -> bool {
        self.phase == ResetPhase::Editing
    }

    /// Replace the input buffer. Ignored while a request is outstanding.
    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.phase == ResetPhase::Submitting {
            return;
        }
        self.email = email.into();
        if self.phase == ResetPhase::Redirected {
            self.phase = ResetPhase::Editing;
        }
    }

    /// Validate the input and move to `Submitting`.
    ///
    /// Validation failures leave the form in `Editing` with `last_error`
    /// set; no request should be sent for them.
    pub fn submit(&mut self) -> Result<ResetSubmission, CoreError> {
        if self.phase == ResetPhase::Submitting {
            return Err(CoreError::Validation {
                field: "email".into(),
                message: "A reset request is already in progress".into(),
            });
        }

        let email = self.email.trim();
        if let Err(err) = validate_email(email) {
            self.last_error = Some(err.user_message(RESET_FAILED_FALLBACK));
            return Err(err);
        }

        let submission = ResetSubmission {
            email: email.to_owned(),
        };
        self.phase = ResetPhase::Submitting;
        self.last_error = None;
        Ok(submission)
    }

    /// Apply the backend's answer for `submission`.
    ///
    /// `Ok` carries the optional confirmation message from the backend.
    pub fn resolve(
        &mut self,
        submission: ResetSubmission,
        outcome: Result<Option<String>, CoreError>,
    ) -> ResetOutcome {
        drop(submission);

        match outcome {
            Ok(message) => {
                self.phase = ResetPhase::Redirected;
                self.last_error = None;
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| RESET_SENT_FALLBACK.to_owned());
                ResetOutcome::RedirectToLogin {
                    notification: Notification::success(message),
                }
            }
            Err(err) => {
                self.phase = ResetPhase::Editing;
                let message = err.user_message(RESET_FAILED_FALLBACK);
                self.last_error = Some(message.clone());
                ResetOutcome::StayOnForm {
                    notification: Notification::error(message),
                }
            }
        }
    }
}

/// Presence and shape check equivalent to `<input type="email" required>`:
/// one `@`, non-empty local part, a domain with no empty labels, no
/// whitespace.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let invalid = |message: &str| CoreError::Validation {
        field: "email".into(),
        message: message.into(),
    };

    if email.is_empty() {
        return Err(invalid("Please enter your email address"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("Please enter a valid email address"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("Please enter a valid email address"));
    };
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || domain.split('.').any(str::is_empty)
    {
        return Err(invalid("Please enter a valid email address"));
    }
    Ok(())
}
