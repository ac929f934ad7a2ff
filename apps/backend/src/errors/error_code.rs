//! Error codes for the Cheers backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Cheers backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Caller is not the room host
    NotHost,
    /// Caller does not hold the current turn
    OutOfTurn,

    // Request Validation
    /// Missing required field for the requested operation
    MissingField,
    /// Die face outside 1..=6
    InvalidDice,
    /// Unknown game mode
    InvalidMode,
    /// Unknown question category
    InvalidCategory,
    /// Actuator id outside the installed range
    InvalidActuator,
    /// Score arithmetic overflowed
    ScoreOutOfRange,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Player not found in the room
    PlayerNotFound,
    /// Room not found in the registry
    RoomNotFound,
    /// Question bank has nothing to offer
    QuestionNotFound,

    // Phase / state conflicts
    /// Operation not allowed in the current phase
    PhaseMismatch,
    /// Not enough active players to start
    NotEnoughPlayers,
    /// Game already started
    GameAlreadyStarted,
    /// Game has not started yet
    GameNotStarted,

    // System Errors
    /// Actuator hardware failure
    ActuatorFailure,
    /// Internal shape inconsistency
    DataCorruption,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotHost => "NOT_HOST",
            Self::OutOfTurn => "OUT_OF_TURN",

            Self::MissingField => "MISSING_FIELD",
            Self::InvalidDice => "INVALID_DICE",
            Self::InvalidMode => "INVALID_MODE",
            Self::InvalidCategory => "INVALID_CATEGORY",
            Self::InvalidActuator => "INVALID_ACTUATOR",
            Self::ScoreOutOfRange => "SCORE_OUT_OF_RANGE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::QuestionNotFound => "QUESTION_NOT_FOUND",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::GameNotStarted => "GAME_NOT_STARTED",

            Self::ActuatorFailure => "ACTUATOR_FAILURE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
