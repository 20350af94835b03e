//! Session state machine driven by fake workout APIs
//!
//! `GatedApi` holds each request open until the test releases it, keyed by goal,
//! so the order in which overlapping requests resolve is under test control.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gymgen_core::api::decode_plan;
use gymgen_core::{
    ApiError, ErrorKind, SessionState, WorkoutApi, WorkoutPlanResponse, WorkoutSession,
};
use tokio::sync::oneshot;

const BENCH_PRESS_FIXTURE: &str = r#"{
    "plano_semanal": [{
        "dia": "A - Chest & Triceps",
        "exercicios": [{
            "nome": "Bench Press",
            "series": "4",
            "repeticoes": "8-10",
            "descanso": "90s",
            "dicas_seguranca": ["Keep back flat"]
        }]
    }]
}"#;

type Outcome = Result<WorkoutPlanResponse, ApiError>;

struct StubApi {
    outcome: Outcome,
}

#[async_trait]
impl WorkoutApi for StubApi {
    async fn request_workout_plan(&self, _goal: &str, _experience_level: &str) -> Outcome {
        self.outcome.clone()
    }
}

#[derive(Default)]
struct GatedApi {
    gates: Mutex<HashMap<String, oneshot::Receiver<Outcome>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl GatedApi {
    fn gate(&self, goal: &str) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(goal.to_string(), rx);
        tx
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkoutApi for GatedApi {
    async fn request_workout_plan(&self, goal: &str, experience_level: &str) -> Outcome {
        self.calls
            .lock()
            .unwrap()
            .push((goal.to_string(), experience_level.to_string()));
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            gates.remove(goal)
        };

        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::TransportError("gate dropped".to_string()))),
            None => Err(ApiError::TransportError(format!("no gate for {}", goal))),
        }
    }
}

struct PanickingApi;

#[async_trait]
impl WorkoutApi for PanickingApi {
    async fn request_workout_plan(&self, _goal: &str, _experience_level: &str) -> Outcome {
        panic!("service exploded")
    }
}

fn plan_with_day(label: &str) -> WorkoutPlanResponse {
    serde_json::from_value(serde_json::json!({
        "plano_semanal": [{ "dia": label, "exercicios": [] }]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_new_session_starts_initial() {
    let session = WorkoutSession::new(StubApi {
        outcome: Err(ApiError::Timeout),
    });
    let mut observer = session.subscribe();

    assert_eq!(session.state(), SessionState::Initial);
    assert_eq!(observer.try_next(), Some(SessionState::Initial));
    assert_eq!(observer.try_next(), None);
}

#[tokio::test]
async fn test_reset_publishes_initial_once_per_call() {
    let session = WorkoutSession::new(StubApi {
        outcome: Err(ApiError::Timeout),
    });
    let mut observer = session.subscribe();
    assert_eq!(observer.try_next(), Some(SessionState::Initial));

    session.reset();
    session.reset();
    session.reset();

    for _ in 0..3 {
        assert_eq!(observer.try_next(), Some(SessionState::Initial));
    }
    assert_eq!(observer.try_next(), None);
}

#[tokio::test]
async fn test_reset_after_failure_returns_to_initial() {
    let session = WorkoutSession::new(StubApi {
        outcome: Err(ApiError::Timeout),
    });

    session.generate("hypertrophy", "Beginner").await.unwrap();
    assert!(matches!(session.state(), SessionState::Failed { .. }));

    session.reset();
    assert_eq!(session.state(), SessionState::Initial);
}

#[tokio::test]
async fn test_generate_publishes_pending_then_exactly_one_terminal_state() {
    let api = Arc::new(GatedApi::default());
    let gate = api.gate("hypertrophy");
    let session = WorkoutSession::with_api(Arc::clone(&api));
    let mut observer = session.subscribe();
    assert_eq!(observer.try_next(), Some(SessionState::Initial));

    let handle = session.generate("hypertrophy", "Beginner");

    // Pending is visible before the request can resolve
    assert_eq!(observer.try_next(), Some(SessionState::Pending));
    assert_eq!(observer.try_next(), None);
    assert!(session.state().is_pending());

    let plan = plan_with_day("Day 1");
    gate.send(Ok(plan.clone())).unwrap();
    handle.await.unwrap();

    assert_eq!(observer.next().await, Some(SessionState::Succeeded(plan)));
    assert_eq!(observer.try_next(), None);
    assert_eq!(
        api.calls(),
        vec![("hypertrophy".to_string(), "Beginner".to_string())]
    );
}

#[tokio::test]
async fn test_success_scenario_matches_fixture() {
    let fixture = decode_plan(BENCH_PRESS_FIXTURE).unwrap();
    let session = WorkoutSession::new(StubApi {
        outcome: Ok(fixture.clone()),
    });

    session.generate("hypertrophy", "Beginner").await.unwrap();

    let SessionState::Succeeded(plan) = session.state() else {
        panic!("expected success, got {:?}", session.state());
    };
    assert_eq!(plan, fixture);
    assert_eq!(plan.weekly_plan.len(), 1);

    let day = &plan.weekly_plan[0];
    assert_eq!(day.day_label, "A - Chest & Triceps");
    assert_eq!(day.exercises.len(), 1);

    let exercise = &day.exercises[0];
    assert_eq!(exercise.name, "Bench Press");
    assert_eq!(exercise.sets, "4");
    assert_eq!(exercise.reps, "8-10");
    assert_eq!(exercise.rest, "90s");
    assert_eq!(exercise.safety_tips, vec!["Keep back flat".to_string()]);
}

#[tokio::test]
async fn test_http_failure_scenario() {
    let session = WorkoutSession::new(StubApi {
        outcome: Err(ApiError::RemoteError {
            status: 500,
            body: "Internal Server Error".to_string(),
        }),
    });

    session.generate("hypertrophy", "Beginner").await.unwrap();

    match session.state() {
        SessionState::Failed { message, kind } => {
            assert!(message.starts_with("Failed to generate workout: "));
            assert!(message.contains("500"));
            assert!(message.contains("Internal Server Error"));
            assert_eq!(kind, ErrorKind::Remote);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_detail_reports_unknown_error() {
    let session = WorkoutSession::new(StubApi {
        outcome: Err(ApiError::TransportError(String::new())),
    });

    session.generate("hypertrophy", "Beginner").await.unwrap();

    assert_eq!(
        session.state(),
        SessionState::Failed {
            message: "Failed to generate workout: Unknown error".to_string(),
            kind: ErrorKind::Transport,
        }
    );
}

#[tokio::test]
async fn test_decoding_failure_keeps_kind() {
    let err = decode_plan(r#"{"weekly": []}"#).unwrap_err();
    let session = WorkoutSession::new(StubApi { outcome: Err(err) });

    session.generate("lose_weight", "Advanced").await.unwrap();

    assert!(matches!(
        session.state(),
        SessionState::Failed { kind: ErrorKind::Decoding, .. }
    ));
}

#[tokio::test]
async fn test_panic_in_api_becomes_unexpected_failure() {
    let session = WorkoutSession::new(PanickingApi);
    let mut observer = session.subscribe();

    session.generate("hypertrophy", "Beginner").await.unwrap();

    assert_eq!(observer.try_next(), Some(SessionState::Initial));
    assert_eq!(observer.try_next(), Some(SessionState::Pending));
    assert_eq!(
        observer.try_next(),
        Some(SessionState::Failed {
            message: "Unexpected error: service exploded".to_string(),
            kind: ErrorKind::Unexpected,
        })
    );
    assert_eq!(observer.try_next(), None);
}

#[tokio::test]
async fn test_overlapping_calls_last_to_resolve_wins() {
    let api = Arc::new(GatedApi::default());
    let first_gate = api.gate("first");
    let second_gate = api.gate("second");
    let session = WorkoutSession::with_api(Arc::clone(&api));
    let mut observer = session.subscribe();

    let first = session.generate("first", "Beginner");
    let second = session.generate("second", "Beginner");

    let second_plan = plan_with_day("Second");
    second_gate.send(Ok(second_plan.clone())).unwrap();
    second.await.unwrap();
    assert_eq!(session.state(), SessionState::Succeeded(second_plan.clone()));

    // The older request resolves afterwards and overwrites the newer result
    first_gate.send(Err(ApiError::Timeout)).unwrap();
    first.await.unwrap();

    let published: Vec<SessionState> = std::iter::from_fn(|| observer.try_next()).collect();
    assert_eq!(
        published,
        vec![
            SessionState::Initial,
            SessionState::Pending,
            SessionState::Pending,
            SessionState::Succeeded(second_plan),
            SessionState::Failed {
                message: "Failed to generate workout: request timed out".to_string(),
                kind: ErrorKind::Timeout,
            },
        ]
    );
}

#[tokio::test]
async fn test_result_still_applies_after_reset() {
    let api = Arc::new(GatedApi::default());
    let gate = api.gate("hypertrophy");
    let session = WorkoutSession::with_api(Arc::clone(&api));

    let handle = session.generate("hypertrophy", "Intermediate");
    session.reset();
    assert_eq!(session.state(), SessionState::Initial);

    let plan = plan_with_day("Late");
    gate.send(Ok(plan.clone())).unwrap();
    handle.await.unwrap();

    assert_eq!(session.state(), SessionState::Succeeded(plan));
}

#[tokio::test]
async fn test_generate_after_failure_restarts() {
    let api = Arc::new(GatedApi::default());
    let failing = api.gate("lose_weight");
    let session = WorkoutSession::with_api(Arc::clone(&api));

    failing
        .send(Err(ApiError::TransportError("connection refused".to_string())))
        .unwrap();
    session.generate("lose_weight", "Beginner").await.unwrap();
    assert!(matches!(
        session.state(),
        SessionState::Failed { kind: ErrorKind::Transport, .. }
    ));

    let retry = api.gate("lose_weight");
    let mut observer = session.subscribe();
    let handle = session.generate("lose_weight", "Beginner");
    let plan = plan_with_day("Cardio");
    retry.send(Ok(plan.clone())).unwrap();
    handle.await.unwrap();

    assert!(matches!(observer.try_next(), Some(SessionState::Failed { .. })));
    assert_eq!(observer.try_next(), Some(SessionState::Pending));
    assert_eq!(observer.try_next(), Some(SessionState::Succeeded(plan)));
}

#[tokio::test]
async fn test_every_observer_sees_every_publication() {
    let session = WorkoutSession::new(StubApi {
        outcome: Ok(plan_with_day("Day 1")),
    });
    let mut early = session.subscribe();

    session.generate("hypertrophy", "Beginner").await.unwrap();
    let mut late = session.subscribe();
    session.reset();

    let early_seen: Vec<&str> = std::iter::from_fn(|| early.try_next())
        .map(|state| state.name())
        .collect();
    let late_seen: Vec<&str> = std::iter::from_fn(|| late.try_next())
        .map(|state| state.name())
        .collect();

    assert_eq!(early_seen, vec!["initial", "pending", "succeeded", "initial"]);
    assert_eq!(late_seen, vec!["succeeded", "initial"]);
}

#[tokio::test]
async fn test_observer_ends_when_session_is_dropped() {
    let session = WorkoutSession::new(StubApi {
        outcome: Err(ApiError::Timeout),
    });
    let mut observer = session.subscribe();
    drop(session);

    assert_eq!(observer.next().await, Some(SessionState::Initial));
    assert_eq!(observer.next().await, None);
}

#[tokio::test]
async fn test_session_exposes_label_mapping() {
    let session = WorkoutSession::new(StubApi {
        outcome: Err(ApiError::Timeout),
    });

    assert_eq!(session.map_goal_label("Muscle Gain (Hypertrophy)"), "hypertrophy");
    assert_eq!(session.map_goal_label("Weight Loss"), "lose_weight");
    assert_eq!(session.map_goal_label("Mobility"), "mobility");
    assert_eq!(session.map_experience_label("Advanced"), "Advanced");
    assert_eq!(session.map_experience_label("Expert"), "Expert");
}

#[tokio::test]
async fn test_session_over_trait_object() {
    let api: Arc<dyn WorkoutApi> = Arc::new(StubApi {
        outcome: Ok(plan_with_day("Upper Body")),
    });
    let session = WorkoutSession::with_api(api);

    session.generate("hypertrophy", "Advanced").await.unwrap();

    assert_eq!(session.state(), SessionState::Succeeded(plan_with_day("Upper Body")));
}
