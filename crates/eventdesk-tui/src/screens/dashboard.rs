//! Dashboard screen — six counter cards.
//!
//! Fetches on first focus and on `r`. A missing token fails the fetch
//! before anything is sent; the failure shows inline and as a toast.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::watch;

use eventdesk_core::{
    DASHBOARD_FALLBACK, DashboardStats, Fetcher, Notifier, RequestState, Session, StatCard, View,
};

use crate::action::Action;
use crate::component::Component;
use crate::screens::{panel, render_error, render_loading};
use crate::theme;

pub struct DashboardScreen {
    session: Session,
    fetcher: Fetcher<DashboardStats>,
    state_rx: watch::Receiver<RequestState<DashboardStats>>,
    throbber: ThrobberState,
    focused: bool,
}

impl DashboardScreen {
    pub fn new(session: Session, notifier: Arc<dyn Notifier>) -> Self {
        let fetcher = Fetcher::new("dashboard", DASHBOARD_FALLBACK, notifier);
        let state_rx = fetcher.subscribe();
        Self {
            session,
            fetcher,
            state_rx,
            throbber: ThrobberState::default(),
            focused: false,
        }
    }

    fn refresh(&self) {
        let session = self.session.clone();
        self.fetcher
            .trigger(async move { session.fetch_dashboard(session.token()).await });
    }

    fn render_cards(frame: &mut Frame, area: Rect, cards: &[StatCard]) {
        let rows = Layout::vertical([Constraint::Length(5), Constraint::Length(5)])
            .spacing(1)
            .split(area);

        for (row_area, row_cards) in rows.iter().zip(cards.chunks(3)) {
            let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3])
                .spacing(2)
                .split(*row_area);
            for (card_area, card) in cols.iter().zip(row_cards) {
                Self::render_card(frame, *card_area, card);
            }
        }
    }

    fn render_card(frame: &mut Frame, area: Rect, card: &StatCard) {
        let block = Block::default()
            .title(Span::styled(format!(" {} ", card.label), theme::table_row()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(card.value.to_string(), theme::stat_value())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(value, inner);
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') => Ok(Some(Action::Refresh)),
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
        let block = panel("Dashboard", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let state = self.state_rx.borrow();
        match state.view() {
            View::Loading => {
                render_loading(frame, inner, &self.throbber, "Loading dashboard statistics...");
            }
            View::Error { message } => render_error(frame, inner, message),
            View::Content(stats) => Self::render_cards(frame, inner, &stats.stat_cards()),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused && self.fetcher.generation() == 0 {
            self.refresh();
        }
    }

    fn key_hints(&self) -> &'static str {
        "r refresh"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use eventdesk_core::{BearerToken, ClientConfig, Notification, Silent};

    use super::*;
    use crate::action::ActionNotifier;
    use crate::screens::test_support::rendered;

    fn session(base: &str, token: Option<&str>) -> Session {
        let mut config = ClientConfig::new(base.parse().unwrap());
        if let Some(token) = token {
            config = config.with_token(BearerToken::new(token));
        }
        Session::new(config).unwrap()
    }

    async fn settled(screen: &mut DashboardScreen) {
        tokio::time::timeout(
            Duration::from_secs(5),
            screen.state_rx.wait_for(RequestState::is_settled),
        )
        .await
        .unwrap()
        .unwrap();
    }

    #[test]
    fn idle_renders_loading_branch() {
        let screen = DashboardScreen::new(session("http://127.0.0.1:9/", None), Arc::new(Silent));
        let text = rendered(&screen, 90, 20);
        assert!(text.contains("Loading dashboard statistics"));
    }

    #[tokio::test]
    async fn first_focus_loads_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dashboard/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalEvents": 42,
                "totalParticipants": 1200,
                "upcomingEvents": 7,
                "pendingEvents": 3,
                "approvedEvents": 39,
                "registeredUsers": 860
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen =
            DashboardScreen::new(session(&server.uri(), Some("t0k")), Arc::new(Silent));
        screen.set_focused(true);
        settled(&mut screen).await;

        let text = rendered(&screen, 90, 20);
        assert!(text.contains("Total Events"));
        assert!(text.contains("42"));
        assert!(text.contains("Registered Users"));
        assert!(text.contains("860"));

        // Refocusing does not refetch.
        screen.set_focused(false);
        screen.set_focused(true);
        assert_eq!(screen.fetcher.generation(), 1);
    }

    #[tokio::test]
    async fn missing_token_shows_error_and_toast() {
        let server = MockServer::start().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen =
            DashboardScreen::new(session(&server.uri(), None), ActionNotifier::shared(tx));

        screen.set_focused(true);
        settled(&mut screen).await;

        let text = rendered(&screen, 90, 20);
        assert!(text.contains("Authentication token not found"));
        assert!(server.received_requests().await.unwrap().is_empty());

        match rx.recv().await.unwrap() {
            Action::Notify(n) => assert_eq!(
                n,
                Notification::error("Authentication token not found. Please sign in again.")
            ),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn r_requests_refresh() {
        let mut screen = DashboardScreen::new(session("http://127.0.0.1:9/", None), Arc::new(Silent));
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('r')))
            .unwrap();
        assert!(matches!(action, Some(Action::Refresh)));
    }
}
