// eventdesk-core: Fetch-state lifecycle and domain layer between eventdesk-api
// and its consumers (CLI/TUI).

pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod model;
pub mod notify;
pub mod password_reset;
pub mod request_state;
pub mod session;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use fetch::{FetchSlot, Fetcher, Resolution, Ticket};
pub use model::{DashboardStats, EventId, FeedbackEntry};
pub use notify::{Notification, NotificationLevel, Notifier, Silent};
pub use password_reset::{
    RESET_FAILED_FALLBACK, RESET_SENT_FALLBACK, ResetForm, ResetOutcome, ResetPhase,
    ResetSubmission, validate_email,
};
pub use request_state::RequestState;
pub use session::{DASHBOARD_FALLBACK, FEEDBACK_FALLBACK, Session};
pub use view::{FeedbackRow, NO_FEEDBACK, StatCard, View, feedback_rows, format_rating};

pub use eventdesk_api::BearerToken;
