// ── Domain model ──
//
// Canonical types the views render. Built from the wire types in
// `eventdesk_api::models` by `convert`; nothing here knows about JSON field
// names.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author shown when a feedback entry carries no name.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Aggregate counters shown on the dashboard.
///
/// Each counter is sourced independently by the backend; no relationship
/// between them is assumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_events: u64,
    pub total_participants: u64,
    pub upcoming_events: u64,
    pub pending_events: u64,
    pub approved_events: u64,
    pub registered_users: u64,
}

/// One attendee's feedback on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub author: String,
    /// Unvalidated; whatever scale the backend uses.
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Identifier of an event, as the backend knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Trimmed id, or `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
