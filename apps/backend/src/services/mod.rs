//! Stateful services shared by the HTTP handlers.

pub mod pours;
pub mod rooms;
pub mod sessions;

pub use pours::PourDispatcher;
pub use rooms::RoomService;
pub use sessions::{SessionRegistry, DEFAULT_ROOM};
