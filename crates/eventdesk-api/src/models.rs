// Wire types for the event-management API.
//
// One explicit decoder per endpoint. Required fields are required: a body
// missing any of them fails to deserialize instead of being half-trusted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Dashboard ────────────────────────────────────────────────────────

/// `GET /dashboard/stats`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_events: u64,
    pub total_participants: u64,
    pub upcoming_events: u64,
    pub pending_events: u64,
    pub approved_events: u64,
    pub registered_users: u64,
}

// ── Feedback ─────────────────────────────────────────────────────────

/// Populated author reference on a feedback document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedbackAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

/// One element of `GET /feedback/event/{eventId}`.
///
/// The author arrives either populated (`user.name`) or flattened
/// (`userName`), depending on the backend query.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<FeedbackAuthor>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackResponse {
    /// Author display name, preferring the populated reference.
    pub fn author_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .or(self.user_name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}

// ── Account ──────────────────────────────────────────────────────────

/// `POST /auth/forgot-password` request body.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

/// `{ "message": ... }` response used by the account endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
