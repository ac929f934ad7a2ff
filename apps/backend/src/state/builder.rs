use std::sync::Arc;

use crate::actuator::{build_controller, Actuator, PumpController};
use crate::config::Config;
use crate::domain::RoomSettings;
use crate::questions::QuestionBank;
use crate::services::{PourDispatcher, SessionRegistry};
use crate::state::app_state::AppState;

/// Builder for [`AppState`].
///
/// Defaults to a simulated pump controller, the built-in question bank and
/// default room settings.
pub struct StateBuilder {
    settings: RoomSettings,
    actuator: Option<Arc<dyn Actuator>>,
    questions: Option<QuestionBank>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            settings: RoomSettings::default(),
            actuator: None,
            questions: None,
        }
    }

    /// Room settings, actuator driver and question bank from configuration.
    pub fn from_config(config: &Config) -> Self {
        let controller = build_controller(&config.actuator);
        Self::new()
            .with_room_settings(config.room)
            .with_actuator(Arc::new(controller))
            .with_questions(QuestionBank::load_or_builtin(
                config.question_bank_path.as_deref(),
            ))
    }

    pub fn with_room_settings(mut self, settings: RoomSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_actuator(mut self, actuator: Arc<dyn Actuator>) -> Self {
        self.actuator = Some(actuator);
        self
    }

    pub fn with_questions(mut self, questions: QuestionBank) -> Self {
        self.questions = Some(questions);
        self
    }

    pub fn build(self) -> AppState {
        let actuator = self
            .actuator
            .unwrap_or_else(|| Arc::new(PumpController::simulated()));
        AppState::new(
            Arc::new(SessionRegistry::new(self.settings)),
            PourDispatcher::new(actuator),
            Arc::new(self.questions.unwrap_or_else(QuestionBank::builtin)),
        )
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new state builder.
///
/// # Example
/// ```rust
/// use cheers_backend::state::build_state;
///
/// let state = build_state().build();
/// assert_eq!(state.room_count(), 1);
/// ```
pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
