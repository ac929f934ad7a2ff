use std::sync::Arc;

use time::OffsetDateTime;

use crate::questions::QuestionBank;
use crate::services::{PourDispatcher, RoomService, SessionRegistry};

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// Room registry with per-room locking.
    pub rooms: RoomService,
    /// Detached and raw actuator commands.
    pub pours: PourDispatcher,
    pub questions: Arc<QuestionBank>,
    pub started_at: OffsetDateTime,
}

impl AppState {
    pub fn new(
        sessions: Arc<SessionRegistry>,
        pours: PourDispatcher,
        questions: Arc<QuestionBank>,
    ) -> Self {
        Self {
            rooms: RoomService::new(sessions),
            pours,
            questions,
            started_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.sessions().room_count()
    }
}
