//! Domain layer: pure game logic types and helpers.

pub mod dice;
pub mod events;
pub mod liveness;
pub mod membership;
pub mod player;
pub mod room;
pub mod rules;
pub mod scoring;
pub mod shared;
pub mod snapshot;
pub mod turns;
pub mod wheel;

pub use player::{Player, PlayerId};
pub use room::{Room, RoomSettings};
pub use rules::GameMode;
