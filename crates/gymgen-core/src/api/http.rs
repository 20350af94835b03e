use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, trace};

use super::WorkoutApi;
use crate::error::ApiError;
use crate::models::{WorkoutPlanResponse, WorkoutRequest};

pub const DEFAULT_BASE_URL: &str = "http://192.168.1.100:5000";
pub const GENERATE_WORKOUT_PATH: &str = "/api/generate-workout";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpWorkoutClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Full URL of the generate endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_WORKOUT_PATH)
    }

    /// Upper bound on a whole request, on top of the per-read timer.
    ///
    /// reqwest has no write timer, so a stalled upload is bounded here.
    pub fn request_deadline(&self) -> Duration {
        self.connect_timeout + self.read_timeout + self.write_timeout
    }
}

/// HTTP client for `POST {base_url}/api/generate-workout`
#[derive(Clone)]
pub struct HttpWorkoutClient {
    client: Client,
    endpoint: String,
}

impl HttpWorkoutClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_deadline())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WorkoutApi for HttpWorkoutClient {
    async fn request_workout_plan(
        &self,
        goal: &str,
        experience_level: &str,
    ) -> Result<WorkoutPlanResponse, ApiError> {
        let request = WorkoutRequest::new(goal, experience_level);
        debug!(url = %self.endpoint, goal, experience_level, "Requesting workout plan");
        trace!(body = ?request, "Request body");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        trace!(status = status.as_u16(), body = %body, "Response body");

        if !status.is_success() {
            return Err(ApiError::RemoteError {
                status: status.as_u16(),
                body,
            });
        }

        decode_plan(&body)
    }
}

/// Parse a response body into a plan. The service is trusted once the shape parses.
pub fn decode_plan(body: &str) -> Result<WorkoutPlanResponse, ApiError> {
    Ok(serde_json::from_str(body)?)
}
