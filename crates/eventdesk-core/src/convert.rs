// ── API-to-domain type conversions ──
//
// Bridges raw `eventdesk_api` response types into canonical `eventdesk_core`
// domain types.

use eventdesk_api::models::{DashboardStatsResponse, FeedbackResponse};

use crate::model::{ANONYMOUS_AUTHOR, DashboardStats, FeedbackEntry};

impl From<DashboardStatsResponse> for DashboardStats {
    fn from(r: DashboardStatsResponse) -> Self {
        Self {
            total_events: r.total_events,
            total_participants: r.total_participants,
            upcoming_events: r.upcoming_events,
            pending_events: r.pending_events,
            approved_events: r.approved_events,
            registered_users: r.registered_users,
        }
    }
}

impl From<FeedbackResponse> for FeedbackEntry {
    fn from(r: FeedbackResponse) -> Self {
        let author = r.author_name().unwrap_or(ANONYMOUS_AUTHOR).to_owned();
        Self {
            id: r.id,
            author,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}
