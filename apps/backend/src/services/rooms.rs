//! Lock, sweep, operate.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::debug;

use crate::domain::{PlayerId, Room};
use crate::errors::domain::DomainError;
use crate::services::sessions::SessionRegistry;

/// Runs room operations under the room's lock, after a liveness sweep.
#[derive(Clone)]
pub struct RoomService {
    sessions: Arc<SessionRegistry>,
}

impl RoomService {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Run `op` with exclusive access to the room. The sweep and the
    /// operation share one critical section.
    pub fn run<T, F>(&self, room_id: &str, op: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Room, OffsetDateTime) -> Result<T, DomainError>,
    {
        self.run_at(room_id, OffsetDateTime::now_utc(), op)
    }

    /// [`run`](Self::run) with an explicit clock.
    pub fn run_at<T, F>(&self, room_id: &str, now: OffsetDateTime, op: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut Room, OffsetDateTime) -> Result<T, DomainError>,
    {
        let handle = self.sessions.get(room_id)?;
        let mut room = handle.lock();
        sweep(&mut room, room_id, now);
        op(&mut *room, now)
    }

    /// Refresh `player_id` and then sweep, so a heartbeat arriving just past
    /// the timeout keeps its sender. Returns whether the id was known.
    pub fn heartbeat(&self, room_id: &str, player_id: &PlayerId) -> Result<bool, DomainError> {
        self.heartbeat_at(room_id, player_id, OffsetDateTime::now_utc())
    }

    pub fn heartbeat_at(
        &self,
        room_id: &str,
        player_id: &PlayerId,
        now: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        let handle = self.sessions.get(room_id)?;
        let mut room = handle.lock();
        let known = room.heartbeat(player_id, now);
        sweep(&mut room, room_id, now);
        Ok(known)
    }
}

fn sweep(room: &mut Room, room_id: &str, now: OffsetDateTime) {
    let swept = room.sweep(now);
    if !swept.is_empty() {
        debug!(
            room_id,
            evicted = swept.evicted.len(),
            dropped = swept.dropped_from_queue.len(),
            "liveness sweep removed players"
        );
    }
}
