pub mod api;
pub mod config;
pub mod error;
pub mod labels;
pub mod models;
pub mod session;

// Re-export main types for convenience
pub use api::{ClientConfig, HttpWorkoutClient, WorkoutApi};
pub use config::Config;
pub use error::{ApiError, ErrorKind};
pub use labels::{map_experience_label, map_goal_label, ExperienceLevel, Goal};
pub use models::{Exercise, WorkoutDay, WorkoutPlanResponse, WorkoutRequest};
pub use session::{SessionState, StateObserver, WorkoutSession};
