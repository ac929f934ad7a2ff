//! Turn-order draw ("wheel").
//!
//! Idle → Spinning → Finished. The candidate list is frozen at spin time and
//! the order is computed over that snapshot, never over live membership,
//! because clients animate the snapshot they were shown.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::domain::player::PlayerId;
use crate::errors::domain::{DomainError, StateKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WheelPhase {
    #[default]
    Idle,
    Spinning,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub player_id: PlayerId,
    pub player_name: String,
}

/// Result of a successful spin, handed back to clients for the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spin {
    pub spin_seed: u64,
    pub winner_index: usize,
}

/// Seeded winner selection in `[0, count - 1]`; `0` for an empty wheel.
pub fn winner_index(seed: u64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.random_range(0..count)
}

/// `candidates[winner..] ++ candidates[..winner]`
pub fn rotate_from(candidates: &[Candidate], winner: usize) -> Vec<PlayerId> {
    let start = if winner < candidates.len() { winner } else { 0 };
    candidates[start..]
        .iter()
        .chain(candidates[..start].iter())
        .map(|c| c.player_id.clone())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Wheel {
    phase: WheelPhase,
    seed: Option<u64>,
    winner: Option<usize>,
    candidates: Vec<Candidate>,
    order: Vec<PlayerId>,
}

impl Wheel {
    pub fn phase(&self) -> WheelPhase {
        self.phase
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    /// Frozen snapshot; empty while idle.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Computed order; empty until finished.
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn spin(&mut self, seed: u64, candidates: Vec<Candidate>) -> Result<Spin, DomainError> {
        if self.phase != WheelPhase::Idle {
            return Err(DomainError::invalid_state(
                StateKind::WheelPhase,
                format!("wheel cannot spin while {:?}", self.phase),
            ));
        }

        let winner = winner_index(seed, candidates.len());
        self.seed = Some(seed);
        self.winner = Some(winner);
        self.candidates = candidates;
        self.order.clear();
        self.phase = WheelPhase::Spinning;

        Ok(Spin {
            spin_seed: seed,
            winner_index: winner,
        })
    }

    /// Idempotent: a finished wheel returns the stored order unchanged.
    pub fn finish(&mut self) -> Result<&[PlayerId], DomainError> {
        match self.phase {
            WheelPhase::Finished => Ok(&self.order),
            WheelPhase::Spinning => {
                self.order = rotate_from(&self.candidates, self.winner.unwrap_or(0));
                self.phase = WheelPhase::Finished;
                Ok(&self.order)
            }
            WheelPhase::Idle => Err(DomainError::invalid_state(
                StateKind::WheelPhase,
                "wheel has not been spun",
            )),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate {
                player_id: PlayerId::from(format!("p{i}")),
                player_name: format!("P{i}"),
            })
            .collect()
    }

    #[test]
    fn spin_then_finish_rotates_snapshot() {
        let mut wheel = Wheel::default();
        let spin = wheel.spin(42, candidates(4)).unwrap();
        assert_eq!(wheel.phase(), WheelPhase::Spinning);

        let order = wheel.finish().unwrap().to_vec();
        assert_eq!(wheel.phase(), WheelPhase::Finished);
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], PlayerId::from(format!("p{}", spin.winner_index)));
    }

    #[test]
    fn finish_twice_returns_identical_order() {
        let mut wheel = Wheel::default();
        wheel.spin(7, candidates(5)).unwrap();
        let first = wheel.finish().unwrap().to_vec();
        let second = wheel.finish().unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn spin_rejected_unless_idle() {
        let mut wheel = Wheel::default();
        wheel.spin(1, candidates(3)).unwrap();
        let err = wheel.spin(2, candidates(3)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(StateKind::WheelPhase, _)));
        assert_eq!(wheel.seed(), Some(1));

        wheel.finish().unwrap();
        assert!(wheel.spin(3, candidates(3)).is_err());
    }

    #[test]
    fn finish_from_idle_is_rejected() {
        let mut wheel = Wheel::default();
        assert!(matches!(
            wheel.finish(),
            Err(DomainError::InvalidState(StateKind::WheelPhase, _))
        ));
    }

    #[test]
    fn empty_wheel_finishes_with_empty_order() {
        let mut wheel = Wheel::default();
        let spin = wheel.spin(9, Vec::new()).unwrap();
        assert_eq!(spin.winner_index, 0);
        assert!(wheel.finish().unwrap().is_empty());
    }

    #[test]
    fn rotate_from_wraps() {
        let order = rotate_from(&candidates(4), 2);
        let ids: Vec<&str> = order.iter().map(|p| p.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p0", "p1"]);
    }

    proptest! {
        #[test]
        fn winner_index_is_reproducible_and_in_range(seed in any::<u64>(), count in 1usize..32) {
            let a = winner_index(seed, count);
            let b = winner_index(seed, count);
            prop_assert_eq!(a, b);
            prop_assert!(a < count);
        }

        #[test]
        fn order_is_rotation_of_snapshot(seed in 1u64..=10_000, count in 1usize..8) {
            let snapshot = candidates(count);
            let mut wheel = Wheel::default();
            wheel.spin(seed, snapshot.clone()).unwrap();
            let order = wheel.finish().unwrap().to_vec();

            let mut sorted_order: Vec<_> = order.clone();
            sorted_order.sort();
            let mut sorted_snapshot: Vec<_> = snapshot.iter().map(|c| c.player_id.clone()).collect();
            sorted_snapshot.sort();
            prop_assert_eq!(sorted_order, sorted_snapshot);

            let w = winner_index(seed, count);
            for (i, id) in order.iter().enumerate() {
                prop_assert_eq!(id, &snapshot[(w + i) % count].player_id);
            }
        }
    }
}
