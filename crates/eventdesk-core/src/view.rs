// ── Rendering projection ──
//
// Pure mapping from request state to what a front-end draws. Every state
// lands in exactly one branch; front-ends match on `View` and never on
// `RequestState` directly.

use crate::model::{DashboardStats, FeedbackEntry};
use crate::request_state::RequestState;

/// Row text shown when an event has no feedback.
pub const NO_FEEDBACK: &str = "No feedback available for this event";

/// The three things a data view can show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a, T> {
    /// Placeholder (spinner, skeleton).
    Loading,
    /// Inline error text. No retry control is implied.
    Error { message: &'a str },
    /// Populated content.
    Content(&'a T),
}

impl<T> RequestState<T> {
    /// Project the state onto a view. `Idle` renders as the loading
    /// placeholder, since every view triggers its fetch on mount.
    pub fn view(&self) -> View<'_, T> {
        match self {
            Self::Idle | Self::Loading => View::Loading,
            Self::Failure(message) => View::Error { message },
            Self::Success(value) => View::Content(value),
        }
    }
}

// ── Dashboard ────────────────────────────────────────────────────────

/// One labelled counter on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: u64,
}

impl DashboardStats {
    /// The six dashboard cards, in display order.
    pub fn stat_cards(&self) -> [StatCard; 6] {
        [
            StatCard {
                label: "Total Events",
                value: self.total_events,
            },
            StatCard {
                label: "Total Participants",
                value: self.total_participants,
            },
            StatCard {
                label: "Upcoming Events",
                value: self.upcoming_events,
            },
            StatCard {
                label: "Pending Events",
                value: self.pending_events,
            },
            StatCard {
                label: "Approved Events",
                value: self.approved_events,
            },
            StatCard {
                label: "Registered Users",
                value: self.registered_users,
            },
        ]
    }
}

// ── Feedback ─────────────────────────────────────────────────────────

/// One row of the feedback table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackRow<'a> {
    Entry(&'a FeedbackEntry),
    /// Placeholder row for an empty list.
    Empty,
}

/// Table rows in backend order. An empty list yields exactly one
/// [`FeedbackRow::Empty`] row.
pub fn feedback_rows(entries: &[FeedbackEntry]) -> Vec<FeedbackRow<'_>> {
    if entries.is_empty() {
        vec![FeedbackRow::Empty]
    } else {
        entries.iter().map(FeedbackRow::Entry).collect()
    }
}

/// `4` for whole ratings, `3.5` otherwise.
pub fn format_rating(rating: f64) -> String {
    if rating.is_finite() && rating.fract().abs() < f64::EPSILON {
        format!("{rating:.0}")
    } else {
        format!("{rating}")
    }
}
