// ── User notifications ──
//
// The side effect produced by a settled request. State transitions return a
// `Notification` as a value; a `Notifier` decides where it ends up (TUI
// toast, CLI stderr line, test recorder).

use serde::Serialize;
use strum::Display;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        self(notification);
    }
}

/// Drops every notification. Used where only the state matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _notification: Notification) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn closures_are_notifiers() {
        let seen = Mutex::new(Vec::new());
        let sink = |n: Notification| {
            if let Ok(mut v) = seen.lock() {
                v.push(n);
            }
        };
        sink.notify(Notification::error("Failed to load feedback"));

        let seen = seen.into_inner().unwrap_or_default();
        assert_eq!(seen, vec![Notification::error("Failed to load feedback")]);
    }

    #[test]
    fn level_display_is_lowercase() {
        assert_eq!(NotificationLevel::Success.to_string(), "success");
        assert_eq!(NotificationLevel::Error.to_string(), "error");
    }
}
