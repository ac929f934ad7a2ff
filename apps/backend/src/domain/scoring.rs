//! Score deltas and win/lose evaluation.

use serde::Serialize;

use crate::domain::player::PlayerId;
use crate::domain::rules::{GameMode, DRINK_LIMIT, ROUND_LIMIT};
use crate::errors::domain::{DomainError, ValidationKind};

/// Per-player integer scores in join order. No lower bound.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: Vec<(PlayerId, i32)>,
}

impl ScoreBoard {
    /// Start (or restart) a player at zero.
    pub fn enter(&mut self, id: &PlayerId) {
        match self.scores.iter_mut().find(|(p, _)| p == id) {
            Some(entry) => entry.1 = 0,
            None => self.scores.push((id.clone(), 0)),
        }
    }

    pub fn remove(&mut self, id: &PlayerId) {
        self.scores.retain(|(p, _)| p != id);
    }

    pub fn get(&self, id: &PlayerId) -> Option<i32> {
        self.scores.iter().find(|(p, _)| p == id).map(|(_, s)| *s)
    }

    /// Apply an unclamped delta. Unknown players are NotFound; a result
    /// outside `i32` is rejected and the score is left as it was.
    pub fn apply(&mut self, id: &PlayerId, delta: i32) -> Result<i32, DomainError> {
        let entry = self
            .scores
            .iter_mut()
            .find(|(p, _)| p == id)
            .ok_or_else(|| DomainError::player_not_found(id))?;
        entry.1 = entry.1.checked_add(delta).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::ScoreOutOfRange,
                format!("score {} plus {delta} is out of range", entry.1),
            )
        })?;
        Ok(entry.1)
    }

    pub fn zero_all(&mut self) {
        for entry in &mut self.scores {
            entry.1 = 0;
        }
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, i32)> {
        self.scores.iter().map(|(p, s)| (p, *s))
    }

    pub fn max(&self) -> Option<i32> {
        self.scores.iter().map(|(_, s)| *s).max()
    }

    pub fn min(&self) -> Option<i32> {
        self.scores.iter().map(|(_, s)| *s).min()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub player_name: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub mode: GameMode,
    pub winners: Vec<Standing>,
    pub losers: Vec<Standing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<i32>,
    pub message: String,
}

/// Threshold mode: the player who just reached the limit loses, everyone
/// else wins. `None` while the score is below the limit.
pub fn threshold_outcome(loser: Standing, others: Vec<Standing>) -> Option<GameResult> {
    if loser.score < DRINK_LIMIT {
        return None;
    }
    let message = format!(
        "{} has had {} drinks! Game over!",
        loser.player_name, loser.score
    );
    Some(GameResult {
        mode: GameMode::Drunk,
        winners: others,
        losers: vec![loser],
        max_score: None,
        min_score: None,
        message,
    })
}

/// Round-count mode: ends once the round passes [`ROUND_LIMIT`].
///
/// Winners are every standing at the maximum score and losers every standing
/// at the minimum. When all scores tie, a player appears in both lists.
pub fn round_outcome(round: u32, standings: &[Standing]) -> Option<GameResult> {
    if round <= ROUND_LIMIT {
        return None;
    }
    let max_score = standings.iter().map(|s| s.score).max();
    let min_score = standings.iter().map(|s| s.score).min();

    let winners = standings
        .iter()
        .filter(|s| Some(s.score) == max_score)
        .cloned()
        .collect();
    let losers = standings
        .iter()
        .filter(|s| Some(s.score) == min_score)
        .cloned()
        .collect();

    Some(GameResult {
        mode: GameMode::Family,
        winners,
        losers,
        max_score,
        min_score,
        message: format!("{ROUND_LIMIT} rounds complete! Game over!"),
    })
}
