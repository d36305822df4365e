// ── Request state ──
//
// The four-state lifecycle every remote-backed view goes through.

use serde::Serialize;

/// Where a single remote fetch currently stands.
///
/// `Idle -> Loading -> {Success, Failure}`. Leaving a terminal state only
/// happens through a fresh trigger, which puts the value back into
/// `Loading`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState<T> {
    /// Nothing has been requested yet.
    Idle,
    /// A request is outstanding.
    Loading,
    /// The latest request succeeded.
    Success(T),
    /// The latest request failed; holds the user-facing message.
    Failure(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the state is `Success` or `Failure`.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(m) => Some(m),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestState<U> {
        match self {
            Self::Idle => RequestState::Idle,
            Self::Loading => RequestState::Loading,
            Self::Success(v) => RequestState::Success(f(v)),
            Self::Failure(m) => RequestState::Failure(m),
        }
    }

    /// Short lowercase name of the variant, for logs.
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let state: RequestState<u32> = RequestState::default();
        assert!(state.is_idle());
        assert!(!state.is_settled());
    }

    #[test]
    fn accessors_are_exclusive() {
        let ok: RequestState<u32> = RequestState::Success(7);
        assert_eq!(ok.value(), Some(&7));
        assert_eq!(ok.error(), None);

        let failed: RequestState<u32> = RequestState::Failure("boom".into());
        assert_eq!(failed.value(), None);
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.is_settled());
    }

    #[test]
    fn map_keeps_failure_message() {
        let failed: RequestState<u32> = RequestState::Failure("nope".into());
        assert_eq!(failed.map(|v| v * 2), RequestState::Failure("nope".into()));
        assert_eq!(RequestState::Success(2).map(|v| v * 2), RequestState::Success(4));
    }

    #[test]
    fn serializes_with_tag() {
        let json = serde_json::to_value(RequestState::Success(3)).unwrap();
        assert_eq!(json["state"], "success");
        assert_eq!(json["value"], 3);
    }
}
