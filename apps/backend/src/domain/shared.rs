//! State every client renders identically: base drink, dice, question,
//! opponent and the pour stack.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::domain::rules::{ACTUATOR_IDS, BASE_COLORS};

pub const NO_OPPONENT: &str = "no other players";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedGameState {
    pub base_color: Option<String>,
    pub base_actuator: Option<u8>,
    pub dice: [u8; 2],
    pub question: Option<String>,
    pub answer: Option<String>,
    pub last_action: Option<String>,
    pub opponent: Option<String>,
    pub pour_stack: Vec<String>,
}

impl Default for SharedGameState {
    fn default() -> Self {
        Self {
            base_color: None,
            base_actuator: None,
            dice: [1, 1],
            question: None,
            answer: None,
            last_action: None,
            opponent: None,
            pour_stack: Vec::new(),
        }
    }
}

/// Random pick from `pool`, avoiding `previous` when another value exists.
fn pick_avoiding<'a, T, R>(pool: &'a [T], previous: Option<&T>, rng: &mut R) -> Option<&'a T>
where
    T: PartialEq,
    R: Rng + ?Sized,
{
    let fresh: Vec<&T> = pool.iter().filter(|v| Some(*v) != previous).collect();
    if fresh.is_empty() {
        pool.choose(rng)
    } else {
        fresh.choose(rng).copied()
    }
}

impl SharedGameState {
    /// Set the base drink. An explicit color is taken as-is; otherwise a
    /// color different from the current one is drawn. The base actuator is
    /// always re-drawn, avoiding the current one, and the stack is emptied.
    pub fn choose_base<R: Rng + ?Sized>(&mut self, color: Option<String>, rng: &mut R) {
        let color = match color.filter(|c| !c.trim().is_empty()) {
            Some(c) => c,
            None => {
                let previous = self.base_color.as_deref();
                pick_avoiding(&BASE_COLORS, previous.as_ref(), rng)
                    .map(|c| (*c).to_string())
                    .unwrap_or_else(|| BASE_COLORS[0].to_string())
            }
        };
        let actuator = pick_avoiding(&ACTUATOR_IDS, self.base_actuator.as_ref(), rng)
            .copied()
            .unwrap_or(ACTUATOR_IDS[0]);

        self.base_color = Some(color);
        self.base_actuator = Some(actuator);
        self.pour_stack.clear();
    }

    /// Keep an actuator the rule engine picked so later reads agree.
    pub fn remember_actuator(&mut self, actuator_id: u8) {
        if self.base_actuator.is_none() {
            self.base_actuator = Some(actuator_id);
        }
    }

    pub fn push_pour(&mut self, color: impl Into<String>) {
        self.pour_stack.push(color.into());
    }

    pub fn set_question(&mut self, question: String, answer: Option<String>) {
        self.question = Some(question);
        self.answer = answer;
    }

    pub fn record_roll(&mut self, die1: u8, die2: u8) {
        self.dice = [die1, die2];
        self.last_action = Some(format!("rolled {die1} and {die2}"));
    }

    /// `None` means nobody else is in the room.
    pub fn set_opponent(&mut self, opponent: Option<&str>) {
        self.opponent = Some(opponent.unwrap_or(NO_OPPONENT).to_string());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn random_base_never_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut shared = SharedGameState::default();
        shared.choose_base(None, &mut rng);
        for _ in 0..50 {
            let prev_color = shared.base_color.clone();
            let prev_actuator = shared.base_actuator;
            shared.choose_base(None, &mut rng);
            assert_ne!(shared.base_color, prev_color);
            assert_ne!(shared.base_actuator, prev_actuator);
        }
    }

    #[test]
    fn explicit_color_is_kept_and_stack_cleared() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut shared = SharedGameState::default();
        shared.push_pour("red");
        shared.push_pour("blue");
        shared.choose_base(Some("green".into()), &mut rng);
        assert_eq!(shared.base_color.as_deref(), Some("green"));
        assert!(shared.pour_stack.is_empty());
        assert!(shared.base_actuator.is_some());
    }

    #[test]
    fn remembered_actuator_does_not_override_existing() {
        let mut shared = SharedGameState::default();
        shared.remember_actuator(3);
        shared.remember_actuator(1);
        assert_eq!(shared.base_actuator, Some(3));
    }

    #[test]
    fn lone_player_gets_placeholder_opponent() {
        let mut shared = SharedGameState::default();
        shared.set_opponent(None);
        assert_eq!(shared.opponent.as_deref(), Some(NO_OPPONENT));
    }
}
