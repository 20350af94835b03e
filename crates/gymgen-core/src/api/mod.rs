//! Client side of the workout generation service
//!
//! [`WorkoutApi`] is the seam the session talks to. [`HttpWorkoutClient`] is the
//! production implementation; tests substitute their own.

pub mod http;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::WorkoutPlanResponse;

pub use http::{
    decode_plan, ClientConfig, HttpWorkoutClient, DEFAULT_BASE_URL, GENERATE_WORKOUT_PATH,
};

/// Source of generated workout plans
#[async_trait]
pub trait WorkoutApi: Send + Sync {
    /// Request one plan for the given API-vocabulary goal and experience level.
    ///
    /// Issues exactly one request; no retries, no caching.
    async fn request_workout_plan(
        &self,
        goal: &str,
        experience_level: &str,
    ) -> Result<WorkoutPlanResponse, ApiError>;
}
