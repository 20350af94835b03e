//! Mapping between the labels a user picks and the service vocabulary

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Hypertrophy,
    WeightLoss,
}

impl Goal {
    pub fn all() -> Vec<Goal> {
        vec![Goal::Hypertrophy, Goal::WeightLoss]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Goal::Hypertrophy => "Muscle Gain (Hypertrophy)",
            Goal::WeightLoss => "Weight Loss",
        }
    }

    pub fn api_value(&self) -> &'static str {
        match self {
            Goal::Hypertrophy => "hypertrophy",
            Goal::WeightLoss => "lose_weight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn all() -> Vec<ExperienceLevel> {
        vec![
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
        }
    }

    /// The service takes the display label as-is
    pub fn api_value(&self) -> &'static str {
        self.display_name()
    }
}

/// Map a goal label to the service token. Unknown labels are lower-cased.
pub fn map_goal_label(ui_label: &str) -> String {
    Goal::all()
        .into_iter()
        .find(|goal| goal.display_name() == ui_label)
        .map(|goal| goal.api_value().to_string())
        .unwrap_or_else(|| ui_label.to_lowercase())
}

/// Map an experience label to the service token. Every input passes through.
pub fn map_experience_label(ui_label: &str) -> String {
    ExperienceLevel::all()
        .into_iter()
        .find(|level| level.display_name() == ui_label)
        .map(|level| level.api_value().to_string())
        .unwrap_or_else(|| ui_label.to_string())
}
