//! UI actions. Every state change in the app goes through one.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use eventdesk_core::{CoreError, Notification, Notifier};

use crate::screen::ScreenId;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Data ──────────────────────────────────────────────────────
    /// Re-run the active screen's fetch.
    Refresh,
    /// The password-reset request finished. `Ok` carries the backend's
    /// confirmation message, if any.
    ResetFinished(Result<Option<String>, CoreError>),
    /// Show the sign-in screen with the given confirmation.
    RedirectToLogin(String),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

/// Forwards notifications into the action loop as [`Action::Notify`].
#[derive(Debug, Clone)]
pub struct ActionNotifier {
    tx: UnboundedSender<Action>,
}

impl ActionNotifier {
    pub fn shared(tx: UnboundedSender<Action>) -> Arc<dyn Notifier> {
        Arc::new(Self { tx })
    }
}

impl Notifier for ActionNotifier {
    fn notify(&self, notification: Notification) {
        // The loop is gone during shutdown; nothing left to show it on.
        let _ = self.tx.send(Action::Notify(notification));
    }
}
