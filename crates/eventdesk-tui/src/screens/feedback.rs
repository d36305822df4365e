//! Feedback screen — event id input plus the feedback table.
//!
//! The event id is the fetch's trigger dependency: submitting a different
//! id starts a new generation, which cancels the request for the old one.
//! Submitting the same id again does nothing; `r` refetches explicitly.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::watch;
use tracing::debug;
use tui_input::Input;

use eventdesk_core::{
    EventId, FEEDBACK_FALLBACK, FeedbackEntry, FeedbackRow, Fetcher, NO_FEEDBACK, Notification,
    Notifier, RequestState, Session, View, feedback_rows, format_rating,
};

use crate::action::Action;
use crate::component::Component;
use crate::screens::{input_request, input_scroll, panel, render_error, render_loading};
use crate::theme;

pub struct FeedbackScreen {
    session: Session,
    fetcher: Fetcher<Vec<FeedbackEntry>>,
    state_rx: watch::Receiver<RequestState<Vec<FeedbackEntry>>>,
    input: Input,
    editing: bool,
    event_id: Option<EventId>,
    selected: usize,
    throbber: ThrobberState,
    focused: bool,
}

impl FeedbackScreen {
    pub fn new(session: Session, notifier: Arc<dyn Notifier>, event_id: Option<EventId>) -> Self {
        let fetcher = Fetcher::new("feedback", FEEDBACK_FALLBACK, notifier);
        let state_rx = fetcher.subscribe();
        let input = Input::new(event_id.as_ref().map(ToString::to_string).unwrap_or_default());
        Self {
            session,
            fetcher,
            state_rx,
            input,
            editing: event_id.is_none(),
            event_id,
            selected: 0,
            throbber: ThrobberState::default(),
            focused: false,
        }
    }

    fn refresh(&mut self) {
        let Some(event_id) = self.event_id.clone() else {
            return;
        };
        self.selected = 0;
        let session = self.session.clone();
        self.fetcher.trigger(async move {
            session.fetch_feedback(&event_id, session.token()).await
        });
    }

    /// Take the typed id. A changed id refetches.
    fn submit(&mut self) -> Option<Action> {
        let Some(id) = EventId::parse(self.input.value()) else {
            return Some(Action::Notify(Notification::warning("Enter an event id")));
        };
        self.editing = false;
        if self.event_id.as_ref() == Some(&id) {
            debug!(event_id = %id, "event id unchanged");
            return None;
        }
        self.input = Input::new(id.to_string());
        self.event_id = Some(id);
        self.refresh();
        None
    }

    fn row_count(&self) -> usize {
        self.state_rx
            .borrow()
            .value()
            .map_or(0, Vec::len)
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                self.editing = false;
                None
            }
            _ => {
                if let Some(req) = input_request(key) {
                    self.input.handle(req);
                }
                None
            }
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = panel("Event", self.editing);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (scroll, cursor) = input_scroll(&self.input, inner.width);
        let text = if self.input.value().is_empty() && !self.editing {
            Span::styled("e to enter an event id", theme::key_hint())
        } else {
            Span::styled(self.input.value(), theme::table_row())
        };
        frame.render_widget(Paragraph::new(Line::from(text)).scroll((0, scroll)), inner);

        if self.editing && self.focused {
            frame.set_cursor_position((inner.x + cursor, inner.y));
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, entries: &[FeedbackEntry]) {
        let now = Utc::now();
        let rows: Vec<Row> = feedback_rows(entries)
            .into_iter()
            .map(|row| match row {
                FeedbackRow::Entry(entry) => Row::new(vec![
                    Cell::from(entry.author.clone()),
                    Cell::from(format_rating(entry.rating)),
                    Cell::from(entry.comment.clone()),
                    Cell::from(age(entry.created_at, now)),
                ]),
                FeedbackRow::Empty => Row::new(vec![Cell::from(NO_FEEDBACK)]),
            })
            .collect();

        let header = Row::new(["Author", "Rating", "Comment", "Submitted"])
            .style(theme::table_header());

        let table = Table::new(
            rows,
            [
                Constraint::Length(20),
                Constraint::Length(8),
                Constraint::Fill(1),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .style(theme::table_row())
        .row_highlight_style(theme::table_selected())
        .column_spacing(2);

        let mut state = TableState::default();
        if !entries.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Compact age of a timestamp, to the largest whole unit.
fn age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds();
    let Ok(secs) = u64::try_from(secs) else {
        return "just now".into();
    };
    let unit = match secs {
        0..60 => return "just now".into(),
        60..3_600 => 60,
        3_600..86_400 => 3_600,
        _ => 86_400,
    };
    let rounded = Duration::from_secs(secs - secs % unit);
    format!("{} ago", humantime::format_duration(rounded))
}

impl Component for FeedbackScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing {
            return Ok(self.handle_editing_key(key));
        }

        match key.code {
            KeyCode::Char('e' | '/') => {
                self.editing = true;
                Ok(None)
            }
            KeyCode::Char('r') => Ok(Some(Action::Refresh)),
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.row_count().saturating_sub(1));
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Refresh => self.refresh(),
            Action::Tick => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);
        self.render_input(frame, layout[0]);

        let title = match &self.event_id {
            Some(id) => format!("Feedback · {id}"),
            None => "Feedback".into(),
        };
        let block = panel(&title, self.focused && !self.editing);
        let inner = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);

        if self.event_id.is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Enter an event id to load its feedback",
                    theme::key_hint(),
                )),
                inner,
            );
            return;
        }

        let state = self.state_rx.borrow();
        match state.view() {
            View::Loading => render_loading(frame, inner, &self.throbber, "Loading feedback..."),
            View::Error { message } => render_error(frame, inner, message),
            View::Content(entries) => self.render_table(frame, inner, entries),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused && self.fetcher.generation() == 0 {
            self.refresh();
        }
    }

    fn editing(&self) -> bool {
        self.editing
    }

    fn key_hints(&self) -> &'static str {
        if self.editing {
            "Enter load  Esc cancel"
        } else {
            "e event id  r refresh  j/k move"
        }
    }
}
