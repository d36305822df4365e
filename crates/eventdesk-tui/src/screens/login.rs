//! Sign-in screen — where a successful password reset lands.
//!
//! Tokens are issued out of band, so this screen only says what to do next.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::panel;
use crate::theme;

#[derive(Default)]
pub struct LoginScreen {
    /// Confirmation carried over from the reset.
    message: Option<String>,
    focused: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Enter => Ok(Some(Action::SwitchScreen(ScreenId::Dashboard))),
            KeyCode::Char('f') => Ok(Some(Action::SwitchScreen(ScreenId::ForgotPassword))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::RedirectToLogin(message) = action {
            self.message = Some(message.clone());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel("Sign in", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        if let Some(message) = &self.message {
            lines.push(Line::from(Span::styled(
                format!("✓ {message}"),
                Style::default().fg(theme::SUCCESS_GREEN),
            )));
            lines.push(Line::from(""));
        }
        lines.extend([
            Line::from(Span::styled(
                "Follow the link in the email, then sign in with your new password.",
                theme::table_row(),
            )),
            Line::from(Span::styled(
                "Store the new token with: eventdesk config set-token",
                theme::table_row(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("dashboard  ", theme::key_hint()),
                Span::styled("f ", theme::key_hint_key()),
                Span::styled("forgot password", theme::key_hint()),
            ]),
        ]);

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> &'static str {
        "Enter dashboard  f forgot password"
    }
}
