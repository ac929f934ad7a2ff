//! Domain-level error type used across the room, engines and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through `From<DomainError> for AppError`.
//!
//! Legitimate negative outcomes ("this total does not trigger a pour") are
//! not errors; they are reported as normal `success: false` payloads.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Missing or malformed caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    MissingField,
    InvalidDice,
    InvalidMode,
    InvalidCategory,
    InvalidActuator,
    /// Score arithmetic left the `i32` range.
    ScoreOutOfRange,
}

/// Caller is a known actor but not the one allowed to act.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnauthorizedKind {
    NotHost,
    NotCurrentTurn,
}

/// Entities that can be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Room,
    Question,
}

/// Phase violations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateKind {
    /// Wheel operation called from the wrong wheel phase.
    WheelPhase,
    AlreadyStarted,
    NotStarted,
    NotEnoughPlayers,
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Internal shape inconsistency (e.g. a success decision with no pours).
    DataCorruption,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing required field or malformed value
    Validation(ValidationKind, String),
    /// Wrong actor (not host, not the current turn holder)
    Unauthorized(UnauthorizedKind, String),
    /// Unknown player / room / question
    NotFound(NotFoundKind, String),
    /// Wrong phase
    InvalidState(StateKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Unauthorized(kind, d) => write!(f, "unauthorized {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::InvalidState(kind, d) => write!(f, "invalid state {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn unauthorized(kind: UnauthorizedKind, detail: impl Into<String>) -> Self {
        Self::Unauthorized(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn invalid_state(kind: StateKind, detail: impl Into<String>) -> Self {
        Self::InvalidState(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Shorthand for the most common lookup failure.
    pub fn player_not_found(player_id: impl Display) -> Self {
        Self::NotFound(
            NotFoundKind::Player,
            format!("player {player_id} is not an active player"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::invalid_state(StateKind::WheelPhase, "wheel is spinning");
        assert_eq!(err.to_string(), "invalid state WheelPhase: wheel is spinning");
    }

    #[test]
    fn player_not_found_shorthand() {
        let err = DomainError::player_not_found("abc");
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
        assert!(err.to_string().contains("abc"));
    }
}
