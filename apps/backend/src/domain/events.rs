//! (mode, event, score) → pour decision.
//!
//! Pure apart from the actuator pick, which draws from the caller's RNG.
//! A decision always carries an ordered list of pours, even for one pump.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::domain::rules::{is_valid_actuator, GameMode, ACTUATOR_IDS};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Durations (seconds) for one mode.
#[derive(Debug)]
pub struct PourRules {
    pub game_start: f64,
    /// Qualifying score totals and the pour they trigger.
    pub score_buckets: &'static [(&'static [i32], f64)],
    pub after_drink: f64,
}

pub const FAMILY_RULES: PourRules = PourRules {
    game_start: 0.5,
    score_buckets: &[(&[4, 8], 0.4), (&[7], 0.6)],
    after_drink: 0.7,
};

pub const DRUNK_RULES: PourRules = PourRules {
    game_start: 0.5,
    score_buckets: &[(&[4, 8], 0.6), (&[7], 0.7)],
    after_drink: 0.7,
};

pub fn rules_for(mode: GameMode) -> &'static PourRules {
    match mode {
        GameMode::Family => &FAMILY_RULES,
        GameMode::Drunk => &DRUNK_RULES,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStart,
    Score,
    AfterDrink,
}

impl GameEvent {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "game_start" => Some(GameEvent::GameStart),
            "score" => Some(GameEvent::Score),
            "after_drink" => Some(GameEvent::AfterDrink),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PourAction {
    pub actuator_id: u8,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub success: bool,
    pub actions: Vec<PourAction>,
    pub message: String,
}

impl Decision {
    fn pour(actuator_id: u8, duration_seconds: f64, message: impl Into<String>) -> Self {
        Self {
            success: true,
            actions: vec![PourAction {
                actuator_id,
                duration_seconds,
            }],
            message: message.into(),
        }
    }

    fn no_effect(message: impl Into<String>) -> Self {
        Self {
            success: false,
            actions: Vec::new(),
            message: message.into(),
        }
    }

    /// Actuator of the first pour, if any.
    pub fn actuator_id(&self) -> Option<u8> {
        self.actions.first().map(|a| a.actuator_id)
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.actions.first().map(|a| a.duration_seconds)
    }

    /// Pours to execute. A successful decision with no pours, an unknown
    /// actuator or a non-positive duration is a server defect.
    pub fn checked_actions(&self) -> Result<&[PourAction], DomainError> {
        if !self.success {
            return Ok(&[]);
        }
        if self.actions.is_empty() {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                "successful pour decision carries no actions",
            ));
        }
        for action in &self.actions {
            if !is_valid_actuator(action.actuator_id) {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("pour decision names unknown actuator {}", action.actuator_id),
                ));
            }
            if !action.duration_seconds.is_finite() || action.duration_seconds <= 0.0 {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!(
                        "pour decision has invalid duration {}",
                        action.duration_seconds
                    ),
                ));
            }
        }
        Ok(&self.actions)
    }
}

pub fn pick_actuator<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    *ACTUATOR_IDS.choose(rng).unwrap_or(&ACTUATOR_IDS[0])
}

/// Resolve a game event into a pour decision.
///
/// Unknown modes, unknown events and non-qualifying scores are normal
/// `success: false` decisions. A `score` event without a score is a
/// validation failure.
pub fn resolve<R: Rng + ?Sized>(
    mode: &str,
    event: &str,
    score: Option<i32>,
    actuator_id: Option<u8>,
    rng: &mut R,
) -> Result<Decision, DomainError> {
    let Some(mode) = GameMode::parse(mode) else {
        return Ok(Decision::no_effect(format!("unknown game mode '{mode}'")));
    };
    let rules = rules_for(mode);
    let mut actuator = || actuator_id.unwrap_or_else(|| pick_actuator(&mut *rng));

    let decision = match GameEvent::parse(event) {
        Some(GameEvent::GameStart) => {
            Decision::pour(actuator(), rules.game_start, "game start: pouring the base")
        }
        Some(GameEvent::Score) => {
            let score = score.ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::MissingField,
                    "score event requires a score",
                )
            })?;
            match rules
                .score_buckets
                .iter()
                .find(|(totals, _)| totals.contains(&score))
            {
                Some((_, duration)) => {
                    Decision::pour(actuator(), *duration, format!("score {score} triggers a pour"))
                }
                None => Decision::no_effect(format!("score {score} does not trigger a pour")),
            }
        }
        Some(GameEvent::AfterDrink) => {
            Decision::pour(actuator(), rules.after_drink, "after drink: topping up the base")
        }
        None => Decision::no_effect("unknown game event"),
    };

    Ok(decision)
}
