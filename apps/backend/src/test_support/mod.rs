//! In-process harness for HTTP tests.
//!
//! Stage one builds an [`AppState`] (usually with a recording actuator so
//! pours can be observed); stage two wraps it in an initialized Actix test
//! service with the production middleware.

pub mod app_builder;

use std::sync::Arc;

use crate::actuator::RecordingActuator;
use crate::domain::RoomSettings;
use crate::state::{build_state, AppState};

pub use app_builder::{create_test_app_builder, TestAppBuilder};

/// State with default room settings and a recording actuator.
pub fn recording_state() -> (AppState, Arc<RecordingActuator>) {
    recording_state_with(RoomSettings::default())
}

pub fn recording_state_with(settings: RoomSettings) -> (AppState, Arc<RecordingActuator>) {
    let recorder = Arc::new(RecordingActuator::new());
    let state = build_state()
        .with_room_settings(settings)
        .with_actuator(recorder.clone())
        .build();
    (state, recorder)
}
