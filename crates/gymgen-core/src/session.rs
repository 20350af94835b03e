//! Workout session state machine
//!
//! A [`WorkoutSession`] owns the single [`SessionState`] of one user session and
//! publishes every change to its observers. Views never mutate state; they call
//! [`WorkoutSession::generate`] or [`WorkoutSession::reset`] and render whatever
//! their [`StateObserver`] yields.
//!
//! Overlapping `generate` calls are not sequenced or cancelled. Each call applies
//! its result when it resolves, so the call that completes last determines the
//! final state, even if it was started first or a `reset` happened meanwhile.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::api::WorkoutApi;
use crate::error::{ApiError, ErrorKind};
use crate::labels;
use crate::models::WorkoutPlanResponse;

pub const FAILURE_PREFIX: &str = "Failed to generate workout";
pub const UNEXPECTED_PREFIX: &str = "Unexpected error";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// What the view should present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing requested yet, or the session was reset
    Initial,
    /// A request is in flight
    Pending,
    Succeeded(WorkoutPlanResponse),
    Failed { message: String, kind: ErrorKind },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Initial => "initial",
            SessionState::Pending => "pending",
            SessionState::Succeeded(_) => "succeeded",
            SessionState::Failed { .. } => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Pending)
    }
}

/// Outcome of a finished request as the state it should publish
pub fn state_from_outcome(outcome: Result<WorkoutPlanResponse, ApiError>) -> SessionState {
    match outcome {
        Ok(plan) => SessionState::Succeeded(plan),
        Err(err) => SessionState::Failed {
            message: describe(FAILURE_PREFIX, &err.detail()),
            kind: err.kind(),
        },
    }
}

/// State for a fault that escaped the typed error channel
pub fn unexpected_failure(detail: &str) -> SessionState {
    SessionState::Failed {
        message: describe(UNEXPECTED_PREFIX, detail),
        kind: ErrorKind::Unexpected,
    }
}

fn describe(prefix: &str, detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        format!("{}: {}", prefix, UNKNOWN_ERROR)
    } else {
        format!("{}: {}", prefix, detail)
    }
}

fn fault_detail(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<&str>()
            .map(|msg| msg.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default(),
        Err(err) => err.to_string(),
    }
}

struct Published {
    current: SessionState,
    observers: Vec<mpsc::UnboundedSender<SessionState>>,
}

/// Current value plus subscribers, updated under one lock so every observer
/// sees publications in the same order.
struct StateCell {
    inner: Mutex<Published>,
}

impl StateCell {
    fn new() -> Self {
        Self {
            inner: Mutex::new(Published {
                current: SessionState::Initial,
                observers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Published> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, state: SessionState) {
        debug!(state = state.name(), "Session state changed");
        let mut inner = self.lock();
        inner.observers.retain(|tx| tx.send(state.clone()).is_ok());
        inner.current = state;
    }

    fn subscribe(&self) -> StateObserver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // Receiver is alive, send cannot fail
        let _ = tx.send(inner.current.clone());
        inner.observers.push(tx);
        StateObserver { rx }
    }

    fn current(&self) -> SessionState {
        self.lock().current.clone()
    }
}

/// Read-only view of a session's state changes
///
/// Yields the state current at subscription time first, then every later
/// publication in order. Ends once the session and its in-flight requests are gone.
pub struct StateObserver {
    rx: mpsc::UnboundedReceiver<SessionState>,
}

impl StateObserver {
    pub async fn next(&mut self) -> Option<SessionState> {
        self.rx.recv().await
    }

    /// Next already-published state, without waiting
    pub fn try_next(&mut self) -> Option<SessionState> {
        self.rx.try_recv().ok()
    }
}

/// Session over any [`WorkoutApi`], including `dyn WorkoutApi`
pub struct WorkoutSession<A: ?Sized> {
    api: Arc<A>,
    state: Arc<StateCell>,
}

impl<A: WorkoutApi + ?Sized + 'static> WorkoutSession<A> {
    pub fn new(api: A) -> Self
    where
        A: Sized,
    {
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<A>) -> Self {
        Self {
            api,
            state: Arc::new(StateCell::new()),
        }
    }

    /// Publish `Pending` and request a plan in the background.
    ///
    /// Must be called from within a tokio runtime. The returned handle resolves
    /// once the terminal state has been published; dropping it does not cancel.
    pub fn generate(&self, goal: &str, experience_level: &str) -> JoinHandle<()> {
        self.state.publish(SessionState::Pending);

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let goal = goal.to_string();
        let experience_level = experience_level.to_string();

        tokio::spawn(async move {
            let call = tokio::spawn(async move {
                api.request_workout_plan(&goal, &experience_level).await
            });

            let next = match call.await {
                Ok(outcome) => {
                    if let Err(err) = &outcome {
                        warn!(error = %err, "Workout request failed");
                    }
                    state_from_outcome(outcome)
                }
                Err(err) => {
                    let detail = fault_detail(err);
                    warn!(detail = %detail, "Workout request aborted");
                    unexpected_failure(&detail)
                }
            };

            state.publish(next);
        })
    }

    /// Return to `Initial`. Publishes on every call.
    pub fn reset(&self) {
        self.state.publish(SessionState::Initial);
    }

    pub fn state(&self) -> SessionState {
        self.state.current()
    }

    pub fn subscribe(&self) -> StateObserver {
        self.state.subscribe()
    }

    /// See [`labels::map_goal_label`]
    pub fn map_goal_label(&self, ui_label: &str) -> String {
        labels::map_goal_label(ui_label)
    }

    /// See [`labels::map_experience_label`]
    pub fn map_experience_label(&self, ui_label: &str) -> String {
        labels::map_experience_label(ui_label)
    }
}
