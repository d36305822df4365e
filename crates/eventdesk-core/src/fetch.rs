// ── Fetch lifecycle ──
//
// `FetchSlot` is the pure transition: it owns a `RequestState` and the
// generation counter, and turns an outcome into the next state plus an
// optional notification. `Fetcher` drives a slot on the tokio runtime,
// publishes every state change through a `watch` channel and hands
// notifications to a `Notifier`.
//
// Each trigger gets a fresh generation and a fresh cancellation token. A
// new trigger cancels the previous request; an outcome carrying an older
// generation is discarded.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::notify::{Notification, Notifier};
use crate::request_state::RequestState;

// ── Pure slot ────────────────────────────────────────────────────────

/// Proof that a request was started for one generation.
///
/// Not `Clone`: each ticket resolves at most once, so a failure can notify
/// at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What `FetchSlot::resolve` did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Resolution {
    /// A newer trigger superseded this ticket; the state is unchanged.
    Stale,
    /// The state was updated. Failures carry the notification to show.
    Applied { notification: Option<Notification> },
}

/// Request state plus generation bookkeeping, with no I/O.
#[derive(Debug)]
pub struct FetchSlot<T> {
    state: RequestState<T>,
    generation: u64,
    in_flight: Option<u64>,
    fallback: String,
}

impl<T> FetchSlot<T> {
    /// `fallback` is shown for failures that carry no displayable message.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            state: RequestState::Idle,
            generation: 0,
            in_flight: None,
            fallback: fallback.into(),
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Start a new generation. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.state = RequestState::Loading;
        Ticket {
            generation: self.generation,
        }
    }

    /// Apply the outcome of the request identified by `ticket`.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<T, CoreError>) -> Resolution {
        if self.in_flight != Some(ticket.generation) {
            return Resolution::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(value) => {
                self.state = RequestState::Success(value);
                Resolution::Applied { notification: None }
            }
            Err(err) => {
                let message = err.user_message(&self.fallback);
                self.state = RequestState::Failure(message.clone());
                Resolution::Applied {
                    notification: Some(Notification::error(message)),
                }
            }
        }
    }

    /// Forget the in-flight request. A `Loading` slot goes back to `Idle`;
    /// settled states are kept.
    pub fn abandon(&mut self) {
        self.in_flight = None;
        if self.state.is_loading() {
            self.state = RequestState::Idle;
        }
    }
}

// ── Async driver ─────────────────────────────────────────────────────

struct Guarded<T> {
    slot: FetchSlot<T>,
    cancel: CancellationToken,
}

struct FetcherInner<T> {
    label: &'static str,
    guarded: Mutex<Guarded<T>>,
    state_tx: watch::Sender<RequestState<T>>,
    notifier: Arc<dyn Notifier>,
}

impl<T> FetcherInner<T> {
    fn lock(&self) -> MutexGuard<'_, Guarded<T>> {
        self.guarded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> FetcherInner<T> {
    fn settle(&self, ticket: Ticket, outcome: Result<T, CoreError>) {
        let generation = ticket.generation();
        let detail = outcome.as_ref().err().map(ToString::to_string);

        let resolution = {
            let mut guarded = self.lock();
            let resolution = guarded.slot.resolve(ticket, outcome);
            if matches!(resolution, Resolution::Applied { .. }) {
                self.state_tx.send_replace(guarded.slot.state().clone());
            }
            resolution
        };

        match resolution {
            Resolution::Stale => {
                debug!(fetch = self.label, generation, "discarding stale outcome");
            }
            Resolution::Applied { notification } => {
                if let Some(detail) = detail {
                    warn!(fetch = self.label, generation, error = %detail, "fetch failed");
                } else {
                    debug!(fetch = self.label, generation, "fetch succeeded");
                }
                if let Some(notification) = notification {
                    self.notifier.notify(notification);
                }
            }
        }
    }
}

/// Runs requests for one view and keeps its `RequestState` current.
///
/// Dropping the fetcher cancels the in-flight request.
pub struct Fetcher<T> {
    inner: Arc<FetcherInner<T>>,
}

impl<T> Fetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// `label` names the fetch in logs; `fallback` is the generic failure
    /// message.
    pub fn new(
        label: &'static str,
        fallback: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state_tx, _) = watch::channel(RequestState::Idle);
        Self {
            inner: Arc::new(FetcherInner {
                label,
                guarded: Mutex::new(Guarded {
                    slot: FetchSlot::new(fallback),
                    cancel: CancellationToken::new(),
                }),
                state_tx,
                notifier,
            }),
        }
    }

    /// Start a new generation: cancel whatever is in flight, switch to
    /// `Loading` and run `request` on the runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger<F>(&self, request: F)
    where
        F: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let (ticket, cancel) = self.begin();
        debug!(
            fetch = self.inner.label,
            generation = ticket.generation(),
            "fetch started"
        );

        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                outcome = request => outcome,
            };
            if let Some(inner) = weak.upgrade() {
                inner.settle(ticket, outcome);
            }
        });
    }

    /// Start a new generation that fails immediately, without a request.
    /// Used for preconditions checked before anything goes out.
    pub fn fail(&self, error: CoreError) {
        let (ticket, _) = self.begin();
        self.inner.settle(ticket, Err(error));
    }

    /// Cancel the in-flight request, if any.
    pub fn cancel(&self) {
        let mut guarded = self.inner.lock();
        guarded.cancel.cancel();
        guarded.slot.abandon();
        self.inner.state_tx.send_replace(guarded.slot.state().clone());
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState<T> {
        self.inner.state_tx.borrow().clone()
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.inner.state_tx.subscribe()
    }

    /// Number of triggers so far.
    pub fn generation(&self) -> u64 {
        self.inner.lock().slot.generation()
    }

    fn begin(&self) -> (Ticket, CancellationToken) {
        let mut guarded = self.inner.lock();
        guarded.cancel.cancel();
        guarded.cancel = CancellationToken::new();
        let ticket = guarded.slot.begin();
        self.inner.state_tx.send_replace(guarded.slot.state().clone());
        (ticket, guarded.cancel.clone())
    }
}

impl<T> Drop for Fetcher<T> {
    fn drop(&mut self) {
        self.inner.lock().cancel.cancel();
    }
}

impl<T> std::fmt::Debug for Fetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("label", &self.inner.label)
            .finish_non_exhaustive()
    }
}
