//! Screen identifiers.

use std::fmt;

/// Each primary TUI screen. The first three are in the tab bar and
/// reachable by number key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Feedback,       // 2
    ForgotPassword, // 3
    /// Sign-in prompt shown after a password reset. Not in the tab bar.
    Login,
}

impl ScreenId {
    /// Tab-bar screens in order.
    pub const ALL: [ScreenId; 3] = [Self::Dashboard, Self::Feedback, Self::ForgotPassword];

    /// Number key for this screen. Login has none.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Feedback => 2,
            Self::ForgotPassword => 3,
            Self::Login => 0,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Dashboard),
            2 => Some(Self::Feedback),
            3 => Some(Self::ForgotPassword),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around). Login moves to the first tab.
    pub fn next(self) -> Self {
        match Self::ALL.iter().position(|&s| s == self) {
            Some(idx) => Self::ALL[(idx + 1) % Self::ALL.len()],
            None => Self::Dashboard,
        }
    }

    pub fn prev(self) -> Self {
        match Self::ALL.iter().position(|&s| s == self) {
            Some(idx) => Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()],
            None => Self::Dashboard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Feedback => "Feedback",
            Self::ForgotPassword => "Forgot password",
            Self::Login => "Sign in",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
