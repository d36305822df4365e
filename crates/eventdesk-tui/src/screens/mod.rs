//! Screen implementations. Each screen is a top-level Component.
//!
//! Shared drawing helpers for the three request-state branches live here so
//! every data screen shows loading and failure the same way.

pub mod dashboard;
pub mod feedback;
pub mod forgot_password;
pub mod login;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tui_input::InputRequest;

use eventdesk_core::{EventId, Notifier, Session};

use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

use self::dashboard::DashboardScreen;
use self::feedback::FeedbackScreen;
use self::forgot_password::ForgotPasswordScreen;
use self::login::LoginScreen;

/// Build every screen. Data screens share the session and the notifier.
pub fn create_screens(
    session: &Session,
    notifier: &Arc<dyn Notifier>,
    initial_event: Option<EventId>,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(DashboardScreen::new(session.clone(), Arc::clone(notifier))),
        ),
        (
            ScreenId::Feedback,
            Box::new(FeedbackScreen::new(
                session.clone(),
                Arc::clone(notifier),
                initial_event,
            )),
        ),
        (
            ScreenId::ForgotPassword,
            Box::new(ForgotPasswordScreen::new(session.clone())),
        ),
        (ScreenId::Login, Box::new(LoginScreen::new())),
    ]
}

// ── Drawing helpers ───────────────────────────────────────────────────

/// Rounded panel with a title, highlighted while focused.
pub(crate) fn panel(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

/// Loading branch: a spinner with a label.
pub(crate) fn render_loading(frame: &mut Frame, area: Rect, state: &ThrobberState, label: &str) {
    let throbber = Throbber::default()
        .label(format!("  {label}"))
        .style(Style::default().fg(theme::NEON_CYAN))
        .throbber_style(Style::default().fg(theme::ACCENT_PURPLE));
    frame.render_stateful_widget(throbber, centered_line(area), &mut state.clone());
}

/// Error branch: the message as inline text. No retry control.
pub(crate) fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(Span::styled(message, theme::error_text())),
        Line::from(""),
        Line::from(Span::styled("r to try again", theme::key_hint())),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered_block(area, 3),
    );
}

fn centered_line(area: Rect) -> Rect {
    centered_block(area, 1)
}

fn centered_block(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: area.width,
        height,
    }
}

/// Map a key to a text-input edit, if it is one.
pub(crate) fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char(c) if !ctrl => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

/// Horizontal scroll and cursor column for a single-line input of `width`.
pub(crate) fn input_scroll(input: &tui_input::Input, width: u16) -> (u16, u16) {
    let width = usize::from(width.saturating_sub(1).max(1));
    let scroll = input.visual_scroll(width);
    let cursor = input.visual_cursor().saturating_sub(scroll);
    (
        u16::try_from(scroll).unwrap_or(u16::MAX),
        u16::try_from(cursor).unwrap_or(u16::MAX),
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Terminal, backend::TestBackend};

    use crate::component::Component;

    /// Render `screen` into an off-screen buffer and return its text.
    #[allow(clippy::unwrap_used)]
    pub fn rendered(screen: &dyn Component, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
