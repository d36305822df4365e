//! Event feedback command.

use tabled::Tabled;

use eventdesk_core::{
    EventId, FEEDBACK_FALLBACK, FeedbackEntry, FeedbackRow, NO_FEEDBACK, Session, feedback_rows,
    format_rating,
};

use crate::cli::{FeedbackArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FeedbackTableRow {
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Comment")]
    comment: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

impl From<FeedbackRow<'_>> for FeedbackTableRow {
    fn from(row: FeedbackRow<'_>) -> Self {
        match row {
            FeedbackRow::Entry(e) => Self {
                author: e.author.clone(),
                rating: format_rating(e.rating),
                comment: e.comment.clone(),
                submitted: e.created_at.format("%Y-%m-%d %H:%M").to_string(),
            },
            FeedbackRow::Empty => Self {
                author: NO_FEEDBACK.into(),
                rating: String::new(),
                comment: String::new(),
                submitted: String::new(),
            },
        }
    }
}

fn table_rows(entries: &[FeedbackEntry]) -> Vec<FeedbackTableRow> {
    feedback_rows(entries)
        .into_iter()
        .map(FeedbackTableRow::from)
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: FeedbackArgs,
    global: &GlobalOpts,
    profile: &str,
) -> Result<(), CliError> {
    let event_id = EventId::parse(&args.event_id).ok_or_else(|| CliError::Validation {
        field: "event-id".into(),
        reason: "must not be empty".into(),
    })?;

    let pb = output::spinner(global, "Loading feedback");
    let result = session.fetch_feedback(&event_id, session.token()).await;
    pb.finish_and_clear();

    let entries = result.map_err(|e| super::request_failed(e, FEEDBACK_FALLBACK, profile))?;
    let out = output::render_list(global.output(), &entries, table_rows, |e| e.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn empty_list_renders_placeholder_row() {
        let rows = table_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author, NO_FEEDBACK);
    }

    #[test]
    fn entry_row_formats_fields() {
        let entries = vec![FeedbackEntry {
            id: "fb1".into(),
            author: "Zoe".into(),
            rating: 4.0,
            comment: "Great".into(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap(),
        }];
        let rows = table_rows(&entries);
        assert_eq!(rows[0].rating, "4");
        assert_eq!(rows[0].submitted, "2024-06-15 10:30");
    }
}
