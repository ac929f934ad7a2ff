use time::Duration;

use super::parse_var;
use crate::domain::rules::{LIVENESS_TIMEOUT_SECS, MIN_PLAYERS, ROOM_CAPACITY};
use crate::domain::RoomSettings;
use crate::error::AppError;

pub fn room_settings<F>(lookup: &F) -> Result<RoomSettings, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let capacity = parse_var(lookup, "ROOM_CAPACITY", ROOM_CAPACITY)?;
    let min_players = parse_var(lookup, "ROOM_MIN_PLAYERS", MIN_PLAYERS)?;
    let timeout_secs = parse_var(lookup, "ROOM_LIVENESS_TIMEOUT_SECS", LIVENESS_TIMEOUT_SECS)?;

    if capacity == 0 {
        return Err(AppError::config("ROOM_CAPACITY must be at least 1"));
    }
    if min_players == 0 || min_players > capacity {
        return Err(AppError::config(format!(
            "ROOM_MIN_PLAYERS must be between 1 and ROOM_CAPACITY ({capacity}), got {min_players}"
        )));
    }
    if timeout_secs <= 0 {
        return Err(AppError::config(
            "ROOM_LIVENESS_TIMEOUT_SECS must be positive",
        ));
    }

    Ok(RoomSettings {
        capacity,
        min_players,
        liveness_timeout: Duration::seconds(timeout_secs),
    })
}
