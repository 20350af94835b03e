use std::sync::Arc;

use gymgen_core::{ExperienceLevel, Goal, SessionState, WorkoutApi, WorkoutSession};
use ratatui::widgets::ListState;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Input,
    Loading,
    Plan,
    Error,
}

impl Screen {
    /// Which screen presents a given session state
    pub fn for_state(state: &SessionState) -> Self {
        match state {
            SessionState::Initial => Screen::Input,
            SessionState::Pending => Screen::Loading,
            SessionState::Succeeded(_) => Screen::Plan,
            SessionState::Failed { .. } => Screen::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Goal,
    Experience,
}

pub struct App {
    pub should_quit: bool,

    // Last state observed from the session
    pub state: SessionState,

    // Input screen
    pub focus: Field,
    pub goal_state: ListState,
    pub experience_state: ListState,
    pub selected_goal: Option<Goal>,
    pub selected_experience: Option<ExperienceLevel>,
    pub show_selection_hint: bool,

    // Plan screen
    pub plan_scroll: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    pub server_url: String,
    session: WorkoutSession<dyn WorkoutApi>,
}

impl App {
    pub fn new(api: Arc<dyn WorkoutApi>, server_url: &str) -> Self {
        Self {
            should_quit: false,
            state: SessionState::Initial,
            focus: Field::Goal,
            goal_state: ListState::default().with_selected(Some(0)),
            experience_state: ListState::default().with_selected(Some(0)),
            selected_goal: None,
            selected_experience: None,
            show_selection_hint: false,
            plan_scroll: 0,
            animation_frame: 0,
            server_url: server_url.to_string(),
            session: WorkoutSession::with_api(api),
        }
    }

    pub fn session(&self) -> &WorkoutSession<dyn WorkoutApi> {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        Screen::for_state(&self.state)
    }

    /// Take a state published by the session
    pub fn apply_state(&mut self, state: SessionState) {
        if matches!(state, SessionState::Succeeded(_)) {
            self.plan_scroll = 0;
        }
        self.state = state;
    }

    /// Submit the chosen options, or show the hint if one is missing
    pub fn generate(&mut self) {
        let (Some(goal), Some(experience)) = (self.selected_goal, self.selected_experience) else {
            self.show_selection_hint = true;
            return;
        };

        self.show_selection_hint = false;
        let goal = self.session.map_goal_label(goal.display_name());
        let experience = self.session.map_experience_label(experience.display_name());
        info!(goal = %goal, experience = %experience, "Generating workout plan");

        // Result arrives through the session observer
        drop(self.session.generate(&goal, &experience));
    }

    /// Back to the input screen, keeping the previous choices
    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Goal => Field::Experience,
            Field::Experience => Field::Goal,
        };
    }

    pub fn option_down(&mut self) {
        let (state, len) = self.focused_list();
        let next = state.selected().map_or(0, |i| (i + 1).min(len - 1));
        state.select(Some(next));
    }

    pub fn option_up(&mut self) {
        let (state, _) = self.focused_list();
        let prev = state.selected().map_or(0, |i| i.saturating_sub(1));
        state.select(Some(prev));
    }

    /// Choose the highlighted option of the focused field
    pub fn choose_option(&mut self) {
        match self.focus {
            Field::Goal => {
                let idx = self.goal_state.selected().unwrap_or(0);
                self.selected_goal = Goal::all().get(idx).copied();
                self.focus = Field::Experience;
            }
            Field::Experience => {
                let idx = self.experience_state.selected().unwrap_or(0);
                self.selected_experience = ExperienceLevel::all().get(idx).copied();
            }
        }
        if self.selected_goal.is_some() && self.selected_experience.is_some() {
            self.show_selection_hint = false;
        }
    }

    pub fn scroll_plan_down(&mut self) {
        self.plan_scroll = self.plan_scroll.saturating_add(1);
    }

    pub fn scroll_plan_up(&mut self) {
        self.plan_scroll = self.plan_scroll.saturating_sub(1);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.state.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    fn focused_list(&mut self) -> (&mut ListState, usize) {
        match self.focus {
            Field::Goal => (&mut self.goal_state, Goal::all().len()),
            Field::Experience => (&mut self.experience_state, ExperienceLevel::all().len()),
        }
    }
}
