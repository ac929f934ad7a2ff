use std::fmt;

use serde::{Deserialize, Serialize};

/// Active-player capacity of a room.
pub const ROOM_CAPACITY: usize = 6;
/// Active players required before the host may start.
pub const MIN_PLAYERS: usize = 2;
/// Heartbeat age after which a client is presumed gone.
pub const LIVENESS_TIMEOUT_SECS: i64 = 600;

/// Threshold mode: the first player to reach this many drinks loses.
pub const DRINK_LIMIT: i32 = 3;
/// Round-count mode: the game ends once the round goes past this value.
pub const ROUND_LIMIT: u32 = 5;

/// Installed actuator channels.
pub const ACTUATOR_IDS: [u8; 4] = [1, 2, 3, 4];
/// Base colors offered when the caller does not choose one.
/// Display name given to a player who joins with a blank name.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

pub const BASE_COLORS: [&str; 4] = ["red", "blue", "yellow", "green"];

/// Seeds for the wheel are drawn from this range.
pub const SPIN_SEED_MIN: u64 = 1;
pub const SPIN_SEED_MAX: u64 = 10_000;

pub fn is_valid_actuator(id: u8) -> bool {
    ACTUATOR_IDS.contains(&id)
}

/// Game modes.
///
/// `Family` is the round-count mode (game ends after [`ROUND_LIMIT`] rounds,
/// highest score wins). `Drunk` is the threshold mode (game ends when a
/// player reaches [`DRINK_LIMIT`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Family,
    #[serde(alias = "alcoholic")]
    Drunk,
}

impl GameMode {
    /// Parse a wire name. Unknown names yield `None` rather than an error so
    /// that callers can decide whether that is a rejection or a no-op.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "family" => Some(GameMode::Family),
            "drunk" | "alcoholic" => Some(GameMode::Drunk),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Family => "family",
            GameMode::Drunk => "drunk",
        }
    }

    /// Round-based end-of-game evaluation applies.
    pub fn is_round_based(self) -> bool {
        matches!(self, GameMode::Family)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_accepts_known_names() {
        assert_eq!(GameMode::parse("family"), Some(GameMode::Family));
        assert_eq!(GameMode::parse("drunk"), Some(GameMode::Drunk));
        assert_eq!(GameMode::parse("alcoholic"), Some(GameMode::Drunk));
        assert_eq!(GameMode::parse("party"), None);
    }

    #[test]
    fn mode_serde_uses_snake_case() {
        let json = serde_json::to_string(&GameMode::Drunk).unwrap();
        assert_eq!(json, "\"drunk\"");
        let back: GameMode = serde_json::from_str("\"alcoholic\"").unwrap();
        assert_eq!(back, GameMode::Drunk);
    }

    #[test]
    fn actuator_range() {
        assert!(is_valid_actuator(1));
        assert!(is_valid_actuator(4));
        assert!(!is_valid_actuator(0));
        assert!(!is_valid_actuator(5));
    }
}
