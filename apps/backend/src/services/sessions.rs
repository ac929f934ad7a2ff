use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::domain::{Room, RoomSettings};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Room every route operates on.
pub const DEFAULT_ROOM: &str = "main";

pub type RoomHandle = Arc<Mutex<Room>>;

/// Room-id keyed map of independently locked rooms.
///
/// Rooms live for the whole process; `Room::reset` clears one in place.
pub struct SessionRegistry {
    rooms: DashMap<String, RoomHandle>,
    settings: RoomSettings,
}

impl SessionRegistry {
    /// Registry holding only the default room.
    pub fn new(settings: RoomSettings) -> Self {
        let registry = Self {
            rooms: DashMap::new(),
            settings,
        };
        registry.open(DEFAULT_ROOM);
        registry
    }

    pub fn settings(&self) -> &RoomSettings {
        &self.settings
    }

    /// Get or create a room.
    pub fn open(&self, room_id: &str) -> RoomHandle {
        self.rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                info!(room_id, "room created");
                Arc::new(Mutex::new(Room::new(self.settings)))
            })
            .clone()
    }

    pub fn get(&self, room_id: &str) -> Result<RoomHandle, DomainError> {
        self.rooms
            .get(room_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Room, format!("room '{room_id}' not found"))
            })
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(RoomSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_room_exists_from_the_start() {
        let registry = SessionRegistry::default();
        assert_eq!(registry.room_count(), 1);
        assert!(registry.get(DEFAULT_ROOM).is_ok());
    }

    #[test]
    fn unknown_room_is_not_found() {
        let registry = SessionRegistry::default();
        assert!(matches!(
            registry.get("side"),
            Err(DomainError::NotFound(NotFoundKind::Room, _))
        ));
    }

    #[test]
    fn open_returns_same_handle() {
        let registry = SessionRegistry::default();
        let a = registry.open("side");
        let b = registry.open("side");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.room_count(), 2);
    }
}
