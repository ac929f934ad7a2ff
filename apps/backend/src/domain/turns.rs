use serde::Serialize;

use crate::domain::player::PlayerId;
use crate::errors::domain::{DomainError, StateKind, UnauthorizedKind};

/// Rounds are 1-based.
pub const FIRST_ROUND: u32 = 1;

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advance {
    pub current_turn_index: usize,
    pub current_player_id: Option<PlayerId>,
    /// Rotation wrapped back to the first player.
    pub wrapped: bool,
    pub current_round: u32,
}

/// Current-player pointer, rotation and round counting.
///
/// The round has two writers that are deliberately kept apart: wrapping
/// the rotation bumps it passively, and `set_round` overwrites it with the
/// value clients report. Only the latter triggers end-of-game evaluation.
#[derive(Debug, Clone)]
pub struct TurnState {
    started: bool,
    order: Vec<PlayerId>,
    index: usize,
    round: u32,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            started: false,
            order: Vec::new(),
            index: 0,
            round: FIRST_ROUND,
        }
    }
}

impl TurnState {
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.started {
            return Err(DomainError::invalid_state(
                StateKind::AlreadyStarted,
                "game already started",
            ));
        }
        self.started = true;
        self.order.clear();
        self.index = 0;
        Ok(())
    }

    pub fn require_started(&self) -> Result<(), DomainError> {
        if self.started {
            Ok(())
        } else {
            Err(DomainError::invalid_state(
                StateKind::NotStarted,
                "game has not started",
            ))
        }
    }

    /// Install the order drawn by the wheel; the first entry acts first.
    pub fn set_order(&mut self, order: Vec<PlayerId>) {
        self.order = order;
        self.index = 0;
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current_player(&self) -> Option<&PlayerId> {
        if !self.started {
            return None;
        }
        self.order.get(self.index)
    }

    pub fn advance(&mut self, requester: &PlayerId) -> Result<Advance, DomainError> {
        self.require_started()?;
        if self.current_player() != Some(requester) {
            return Err(DomainError::unauthorized(
                UnauthorizedKind::NotCurrentTurn,
                "it is not your turn",
            ));
        }

        self.index = (self.index + 1) % self.order.len();
        let wrapped = self.index == 0;
        if wrapped {
            self.round += 1;
        }

        Ok(Advance {
            current_turn_index: self.index,
            current_player_id: self.current_player().cloned(),
            wrapped,
            current_round: self.round,
        })
    }

    pub fn set_round(&mut self, round: u32) {
        self.round = round;
    }

    /// Stop the game without touching the round (room emptied).
    pub fn end(&mut self) {
        self.started = false;
        self.order.clear();
        self.index = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn started_with(n: usize) -> TurnState {
        let mut turns = TurnState::default();
        turns.start().unwrap();
        turns.set_order((0..n).map(|i| PlayerId::from(format!("p{i}"))).collect());
        turns
    }

    #[test]
    fn no_current_player_before_start() {
        let turns = TurnState::default();
        assert_eq!(turns.current_player(), None);
        assert!(turns.require_started().is_err());
    }

    #[test]
    fn only_current_player_may_advance() {
        let mut turns = started_with(3);
        let err = turns.advance(&PlayerId::from("p1")).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Unauthorized(UnauthorizedKind::NotCurrentTurn, _)
        ));
        assert_eq!(turns.index(), 0);

        let adv = turns.advance(&PlayerId::from("p0")).unwrap();
        assert_eq!(adv.current_turn_index, 1);
        assert_eq!(adv.current_player_id, Some(PlayerId::from("p1")));
        assert!(!adv.wrapped);
    }

    #[test]
    fn wrap_bumps_round_passively() {
        let mut turns = started_with(2);
        turns.advance(&PlayerId::from("p0")).unwrap();
        let adv = turns.advance(&PlayerId::from("p1")).unwrap();
        assert!(adv.wrapped);
        assert_eq!(adv.current_round, FIRST_ROUND + 1);
    }

    #[test]
    fn explicit_round_overrides_counter() {
        let mut turns = started_with(2);
        turns.set_round(4);
        turns.advance(&PlayerId::from("p0")).unwrap();
        turns.advance(&PlayerId::from("p1")).unwrap();
        assert_eq!(turns.round(), 5);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut turns = TurnState::default();
        turns.start().unwrap();
        assert!(matches!(
            turns.start(),
            Err(DomainError::InvalidState(StateKind::AlreadyStarted, _))
        ));
    }

    #[test]
    fn advance_with_empty_order_is_unauthorized() {
        let mut turns = TurnState::default();
        turns.start().unwrap();
        assert!(turns.advance(&PlayerId::from("p0")).is_err());
    }

    proptest! {
        #[test]
        fn full_cycle_returns_to_start(n in 1usize..8, warmup in 0usize..8) {
            let mut turns = started_with(n);
            for _ in 0..warmup {
                let current = turns.current_player().cloned().unwrap();
                turns.advance(&current).unwrap();
            }
            let start = turns.index();
            for _ in 0..n {
                let current = turns.current_player().cloned().unwrap();
                turns.advance(&current).unwrap();
            }
            prop_assert_eq!(turns.index(), start);
        }
    }
}
