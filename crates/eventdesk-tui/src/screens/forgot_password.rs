//! Forgot-password screen — one email field and a submit.
//!
//! The request runs on a spawned task and reports back with
//! [`Action::ResetFinished`]. Success redirects to the sign-in screen;
//! failure shows the message and keeps the typed email.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use tui_input::Input;

use eventdesk_core::{CoreError, ResetForm, ResetPhase, ResetSubmission, Session};

use crate::action::Action;
use crate::component::Component;
use crate::screens::{input_request, input_scroll, panel, render_loading};
use crate::theme;

pub struct ForgotPasswordScreen {
    session: Session,
    form: ResetForm,
    input: Input,
    /// The attempt awaiting its [`Action::ResetFinished`].
    pending: Option<ResetSubmission>,
    action_tx: Option<UnboundedSender<Action>>,
    throbber: ThrobberState,
    focused: bool,
}

impl ForgotPasswordScreen {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            form: ResetForm::new(),
            input: Input::default(),
            pending: None,
            action_tx: None,
            throbber: ThrobberState::default(),
            focused: false,
        }
    }

    fn submit(&mut self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };

        self.form.set_email(self.input.value());
        let submission = match self.form.submit() {
            Ok(submission) => submission,
            Err(err) => {
                debug!(error = %err, "reset submit refused");
                return;
            }
        };

        let email = submission.email().to_owned();
        self.pending = Some(submission);
        let session = self.session.clone();

        tokio::spawn(async move {
            let result = session.request_password_reset(&email).await;
            if let Err(ref e) = result {
                warn!(error = %e, "password reset request failed");
            }
            let _ = tx.send(Action::ResetFinished(result));
        });
    }

    fn finish(&mut self, result: &Result<Option<String>, CoreError>) -> Option<Action> {
        let Some(submission) = self.pending.take() else {
            debug!("reset result without a pending submission");
            return None;
        };

        let outcome = self.form.resolve(submission, result.clone());
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(Action::Notify(outcome.notification().clone()));
        }

        if outcome.redirects() {
            info!("password reset link sent, redirecting to sign in");
            // Coming back to this screen starts a fresh form.
            self.input.reset();
            self.form.set_email("");
            Some(Action::RedirectToLogin(outcome.notification().message.clone()))
        } else {
            None
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter the email address of your account. We will send you a reset link.",
                theme::table_row(),
            )),
            layout[0],
        );

        let submitting = self.form.phase() == ResetPhase::Submitting;
        let field = panel("Email", self.focused && !submitting);
        let inner = field.inner(layout[1]);
        frame.render_widget(field, layout[1]);

        let (scroll, cursor) = input_scroll(&self.input, inner.width);
        frame.render_widget(
            Paragraph::new(Span::styled(self.input.value(), theme::table_row()))
                .scroll((0, scroll)),
            inner,
        );
        if self.focused && !submitting {
            frame.set_cursor_position((inner.x + cursor, inner.y));
        }

        if let Some(error) = self.form.last_error() {
            frame.render_widget(
                Paragraph::new(Span::styled(error, theme::error_text())),
                layout[2],
            );
        }

        if submitting {
            render_loading(frame, layout[3], &self.throbber, "Sending reset link...");
        } else {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("Enter ", theme::key_hint_key()),
                    Span::styled("send reset link", theme::key_hint()),
                ])),
                layout[3],
            );
        }
    }
}

impl Component for ForgotPasswordScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Enter => {
                self.submit();
                Ok(None)
            }
            KeyCode::Esc => Ok(Some(Action::GoBack)),
            _ => {
                if self.form.can_submit() {
                    if let Some(req) = input_request(key) {
                        self.input.handle(req);
                    }
                }
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ResetFinished(result) => Ok(self.finish(result)),
            Action::Tick => {
                self.throbber.calc_next();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel("Forgot password", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let form_area = Rect {
            x: inner.x + 2,
            y: inner.y + 1,
            width: inner.width.saturating_sub(4).min(72),
            height: inner.height.saturating_sub(1),
        };
        self.render_form(frame, form_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn editing(&self) -> bool {
        true
    }

    fn key_hints(&self) -> &'static str {
        "Enter submit  Esc back"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use tokio::sync::mpsc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use eventdesk_core::{ClientConfig, Notification};

    use super::*;
    use crate::screens::test_support::rendered;

    fn screen(base: &str) -> (ForgotPasswordScreen, mpsc::UnboundedReceiver<Action>) {
        let session = Session::new(ClientConfig::new(base.parse().unwrap())).unwrap();
        let mut s = ForgotPasswordScreen::new(session);
        let (tx, rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();
        s.set_focused(true);
        (s, rx)
    }

    fn type_text(s: &mut ForgotPasswordScreen, text: &str) {
        for c in text.chars() {
            s.handle_key_event(KeyEvent::from(KeyCode::Char(c))).unwrap();
        }
    }

    async fn next_finished(rx: &mut mpsc::UnboundedReceiver<Action>) -> Action {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let action = rx.recv().await.unwrap();
                if matches!(action, Action::ResetFinished(_)) {
                    return action;
                }
            }
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn success_redirects_to_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/forgot-password"))
            .and(body_json(json!({ "email": "a@b.com" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Reset link sent" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (mut s, mut rx) = screen(&server.uri());
        type_text(&mut s, "a@b.com");
        s.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(s.form.phase(), ResetPhase::Submitting);
        assert!(rendered(&s, 90, 14).contains("Sending reset link"));

        let finished = next_finished(&mut rx).await;
        let follow_up = s.update(&finished).unwrap();
        assert!(matches!(follow_up, Some(Action::RedirectToLogin(ref m)) if m == "Reset link sent"));
        assert!(s.form.can_submit());
        assert_eq!(s.input.value(), "");

        match rx.try_recv().unwrap() {
            Action::Notify(n) => assert_eq!(n, Notification::success("Reset link sent")),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_shows_server_text_and_stays() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/forgot-password"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "message": "Something went wrong" })),
            )
            .mount(&server)
            .await;

        let (mut s, mut rx) = screen(&server.uri());
        type_text(&mut s, "a@b.com");
        s.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();

        let finished = next_finished(&mut rx).await;
        assert!(s.update(&finished).unwrap().is_none());
        assert_eq!(s.form.phase(), ResetPhase::Editing);
        assert_eq!(s.input.value(), "a@b.com");
        assert!(rendered(&s, 90, 14).contains("Something went wrong"));

        match rx.try_recv().unwrap() {
            Action::Notify(n) => assert_eq!(n, Notification::error("Something went wrong")),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_email_sends_nothing() {
        let server = MockServer::start().await;
        let (mut s, _rx) = screen(&server.uri());
        type_text(&mut s, "not-an-email");
        s.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();

        assert_eq!(s.form.phase(), ResetPhase::Editing);
        assert!(s.pending.is_none());
        assert!(rendered(&s, 90, 14).contains("valid email"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn unsolicited_result_is_ignored() {
        let (mut s, mut rx) = screen("http://127.0.0.1:9/");
        let follow_up = s
            .update(&Action::ResetFinished(Err(CoreError::Timeout { timeout_secs: 30 })))
            .unwrap();
        assert!(follow_up.is_none());
        assert!(rx.try_recv().is_err());
    }
}
