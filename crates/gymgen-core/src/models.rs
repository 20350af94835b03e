//! Wire types exchanged with the workout generation service
//!
//! The service speaks Portuguese field names; these are bound with serde renames
//! so the rest of the crate works with plain Rust names.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate-workout`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRequest {
    #[serde(rename = "objetivo")]
    pub goal: String,
    #[serde(rename = "nivel_experiencia")]
    pub experience_level: String,
}

impl WorkoutRequest {
    pub fn new(goal: &str, experience_level: &str) -> Self {
        Self {
            goal: goal.to_string(),
            experience_level: experience_level.to_string(),
        }
    }
}

/// A generated weekly plan, days in training order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlanResponse {
    #[serde(rename = "plano_semanal")]
    pub weekly_plan: Vec<WorkoutDay>,
}

/// One training day, e.g. "A - Chest & Triceps"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    #[serde(rename = "dia")]
    pub day_label: String,
    #[serde(rename = "exercicios")]
    pub exercises: Vec<Exercise>,
}

/// A single exercise prescription
///
/// `sets`, `reps` and `rest` are free text as sent by the service ("3-4", "90s").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "series")]
    pub sets: String,
    #[serde(rename = "repeticoes")]
    pub reps: String,
    #[serde(rename = "descanso")]
    pub rest: String,
    #[serde(rename = "dicas_seguranca")]
    pub safety_tips: Vec<String>,
}

impl WorkoutPlanResponse {
    pub fn total_exercises(&self) -> usize {
        self.weekly_plan.iter().map(|day| day.exercises.len()).sum()
    }
}
