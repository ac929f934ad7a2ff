//! Dice roll → game event classification.

use rand::Rng;
use serde::Serialize;

use crate::domain::rules::GameMode;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceEvent {
    TriviaQuiz,
    RandomPour,
    RockPaper,
    ChooseColor,
    DrinkReset,
    DrinkPenalty,
    TruthDare,
    NeverHaveI,
    ArmWrestling,
    DragonGate,
    Unknown,
}

impl DiceEvent {
    pub fn description(self) -> &'static str {
        match self {
            DiceEvent::TriviaQuiz => "Trivia challenge",
            DiceEvent::RandomPour => "The machine adds a random pour",
            DiceEvent::RockPaper => "Rock-paper-scissors showdown",
            DiceEvent::ChooseColor => "Choose the color to add",
            DiceEvent::DrinkReset => "Drink up! Score +1 and a new base",
            DiceEvent::DrinkPenalty => "Doubles! Take a penalty drink",
            DiceEvent::TruthDare => "Truth or dare",
            DiceEvent::NeverHaveI => "Never have I ever",
            DiceEvent::ArmWrestling => "Arm wrestling duel",
            DiceEvent::DragonGate => "Dragon gate",
            DiceEvent::Unknown => "Unknown event",
        }
    }
}

/// Totals 3..=11; 2 and 12 are only reachable as doubles.
fn family_event(total: u8) -> DiceEvent {
    match total {
        3 | 5 => DiceEvent::TriviaQuiz,
        4 | 8 => DiceEvent::RandomPour,
        6 => DiceEvent::RockPaper,
        7 => DiceEvent::ChooseColor,
        9 => DiceEvent::DrinkReset,
        10 | 11 => DiceEvent::TruthDare,
        _ => DiceEvent::Unknown,
    }
}

fn drunk_event(total: u8) -> DiceEvent {
    match total {
        3 => DiceEvent::NeverHaveI,
        5 => DiceEvent::ArmWrestling,
        4 | 8 => DiceEvent::RandomPour,
        6 => DiceEvent::RockPaper,
        7 => DiceEvent::ChooseColor,
        9 => DiceEvent::DragonGate,
        10 | 11 => DiceEvent::TruthDare,
        _ => DiceEvent::Unknown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
    pub total: u8,
    pub is_double: bool,
    pub event: DiceEvent,
    pub description: &'static str,
}

/// Classify a pair of die faces. Doubles bypass the totals table.
pub fn classify(mode: GameMode, die1: u8, die2: u8) -> Result<DiceRoll, DomainError> {
    for face in [die1, die2] {
        if !(1..=6).contains(&face) {
            return Err(DomainError::validation(
                ValidationKind::InvalidDice,
                format!("die face {face} is outside 1..=6"),
            ));
        }
    }

    Ok(build(mode, die1, die2))
}

fn build(mode: GameMode, die1: u8, die2: u8) -> DiceRoll {
    let total = die1 + die2;
    let is_double = die1 == die2;
    let event = match (is_double, mode) {
        (true, GameMode::Family) => DiceEvent::DrinkReset,
        (true, GameMode::Drunk) => DiceEvent::DrinkPenalty,
        (false, GameMode::Family) => family_event(total),
        (false, GameMode::Drunk) => drunk_event(total),
    };

    DiceRoll {
        die1,
        die2,
        total,
        is_double,
        event,
        description: event.description(),
    }
}

pub fn roll<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> DiceRoll {
    let die1 = rng.random_range(1..=6u8);
    let die2 = rng.random_range(1..=6u8);
    build(mode, die1, die2)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn seven_chooses_color_in_both_modes() {
        for mode in [GameMode::Family, GameMode::Drunk] {
            let roll = classify(mode, 3, 4).unwrap();
            assert_eq!(roll.total, 7);
            assert!(!roll.is_double);
            assert_eq!(roll.event, DiceEvent::ChooseColor);
        }
    }

    #[test]
    fn doubles_bypass_table() {
        assert_eq!(
            classify(GameMode::Family, 2, 2).unwrap().event,
            DiceEvent::DrinkReset
        );
        assert_eq!(
            classify(GameMode::Drunk, 2, 2).unwrap().event,
            DiceEvent::DrinkPenalty
        );
        // 6+6 would be unmapped as a total, but doubles win.
        assert_eq!(
            classify(GameMode::Drunk, 6, 6).unwrap().event,
            DiceEvent::DrinkPenalty
        );
    }

    #[test]
    fn mode_specific_totals() {
        assert_eq!(
            classify(GameMode::Family, 1, 2).unwrap().event,
            DiceEvent::TriviaQuiz
        );
        assert_eq!(
            classify(GameMode::Drunk, 1, 2).unwrap().event,
            DiceEvent::NeverHaveI
        );
        assert_eq!(
            classify(GameMode::Family, 4, 5).unwrap().event,
            DiceEvent::DrinkReset
        );
        assert_eq!(
            classify(GameMode::Drunk, 4, 5).unwrap().event,
            DiceEvent::DragonGate
        );
    }

    #[test]
    fn non_double_totals_cover_three_to_eleven() {
        for mode in [GameMode::Family, GameMode::Drunk] {
            for a in 1..=6u8 {
                for b in 1..=6u8 {
                    if a == b {
                        continue;
                    }
                    let roll = classify(mode, a, b).unwrap();
                    assert_ne!(roll.event, DiceEvent::Unknown, "{a}+{b} in {mode}");
                }
            }
        }
    }

    #[test]
    fn unknown_totals_get_placeholder() {
        assert_eq!(family_event(2), DiceEvent::Unknown);
        assert_eq!(drunk_event(12), DiceEvent::Unknown);
        assert_eq!(DiceEvent::Unknown.description(), "Unknown event");
    }

    #[test]
    fn out_of_range_faces_are_rejected() {
        assert!(matches!(
            classify(GameMode::Family, 0, 3),
            Err(DomainError::Validation(ValidationKind::InvalidDice, _))
        ));
        assert!(classify(GameMode::Family, 3, 7).is_err());
    }

    #[test]
    fn roll_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let r = roll(GameMode::Drunk, &mut rng);
            assert!((1..=6).contains(&r.die1));
            assert!((1..=6).contains(&r.die2));
            assert_eq!(r.total, r.die1 + r.die2);
        }
    }
}
