//! One game session: membership, wheel, turns, scores and shared screen.
//!
//! `Room` is plain data with no interior locking. Callers hold a single
//! guard around every method call so each compound read-modify-write is
//! atomic with respect to other requests.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::domain::dice::{self, DiceRoll};
use crate::domain::events::{self, Decision};
use crate::domain::liveness::LivenessPolicy;
use crate::domain::membership::{Admission, Departure, Roster};
use crate::domain::player::{Player, PlayerId};
use crate::domain::rules::{
    GameMode, DEFAULT_PLAYER_NAME, LIVENESS_TIMEOUT_SECS, MIN_PLAYERS, ROOM_CAPACITY,
};
use crate::domain::scoring::{round_outcome, threshold_outcome, GameResult, ScoreBoard, Standing};
use crate::domain::shared::SharedGameState;
use crate::domain::turns::{Advance, TurnState};
use crate::domain::wheel::{Candidate, Spin, Wheel, WheelPhase};
use crate::errors::domain::{DomainError, StateKind, UnauthorizedKind, ValidationKind};

/// Tunables read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSettings {
    pub capacity: usize,
    pub min_players: usize,
    pub liveness_timeout: Duration,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            capacity: ROOM_CAPACITY,
            min_players: MIN_PLAYERS,
            liveness_timeout: Duration::seconds(LIVENESS_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined {
    pub player_id: PlayerId,
    pub admission: Admission,
}

/// Players removed by a liveness sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sweep {
    pub evicted: Vec<PlayerId>,
    pub dropped_from_queue: Vec<PlayerId>,
}

impl Sweep {
    pub fn is_empty(&self) -> bool {
        self.evicted.is_empty() && self.dropped_from_queue.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rolled {
    #[serde(flatten)]
    pub roll: DiceRoll,
    pub current_opponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreUpdate {
    pub player_id: PlayerId,
    pub score_delta: i32,
    pub new_score: i32,
    pub game_ended: bool,
}

/// Reply to a round report. `success: false` is a no-effect outcome in the
/// threshold mode, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundUpdate {
    pub success: bool,
    pub current_round: u32,
    pub game_ended: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Room {
    settings: RoomSettings,
    roster: Roster,
    liveness: LivenessPolicy,
    wheel: Wheel,
    turns: TurnState,
    scores: ScoreBoard,
    shared: SharedGameState,
    mode: GameMode,
    ended: bool,
    result: Option<GameResult>,
}

impl Default for Room {
    fn default() -> Self {
        Self::new(RoomSettings::default())
    }
}

impl Room {
    pub fn new(settings: RoomSettings) -> Self {
        Self {
            settings,
            roster: Roster::new(settings.capacity),
            liveness: LivenessPolicy::new(settings.liveness_timeout),
            wheel: Wheel::default(),
            turns: TurnState::default(),
            scores: ScoreBoard::default(),
            shared: SharedGameState::default(),
            mode: GameMode::default(),
            ended: false,
            result: None,
        }
    }

    pub fn settings(&self) -> &RoomSettings {
        &self.settings
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn turns(&self) -> &TurnState {
        &self.turns
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn shared(&self) -> &SharedGameState {
        &self.shared
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn can_start(&self) -> bool {
        !self.turns.is_started() && self.roster.active_count() >= self.settings.min_players
    }

    pub fn current_player(&self) -> Option<&PlayerId> {
        self.turns.current_player()
    }

    // ---- membership ------------------------------------------------------

    /// Seat or queue a new player. Never fails; a blank name becomes
    /// [`DEFAULT_PLAYER_NAME`].
    pub fn join(&mut self, name: &str, now: OffsetDateTime) -> Joined {
        let name = match name.trim() {
            "" => DEFAULT_PLAYER_NAME,
            trimmed => trimmed,
        };

        let player_id = PlayerId::generate();
        let admission = self
            .roster
            .admit(Player::new(player_id.clone(), name, now));
        if admission == Admission::Active {
            self.scores.enter(&player_id);
        }
        info!(player_id = %player_id, player_name = name, ?admission, "player joined");

        Joined {
            player_id,
            admission,
        }
    }

    pub fn leave(&mut self, id: &PlayerId) -> Departure {
        let departure = self.roster.remove(id);
        match &departure {
            Departure::Left {
                new_host,
                emptied,
                promoted,
                ..
            } => {
                self.scores.remove(id);
                if *emptied {
                    self.turns.end();
                    info!(player_id = %id, "room emptied; game stopped");
                }
                if let Some(promoted) = promoted {
                    self.scores.enter(promoted);
                    info!(player_id = %promoted, "queued player promoted");
                }
                if let Some(host) = new_host {
                    info!(player_id = %host, "host transferred");
                }
                info!(player_id = %id, "player left");
            }
            Departure::Dequeued => debug!(player_id = %id, "player left the queue"),
            Departure::Unknown => debug!(player_id = %id, "leave for unknown player ignored"),
        }
        departure
    }

    pub fn heartbeat(&mut self, id: &PlayerId, now: OffsetDateTime) -> bool {
        self.roster.touch(id, now)
    }

    /// Evict expired active players through `leave`, then drop expired
    /// queue entries.
    pub fn sweep(&mut self, now: OffsetDateTime) -> Sweep {
        let evicted = self.roster.stale_active(&self.liveness, now);
        for id in &evicted {
            info!(player_id = %id, "evicting inactive player");
            self.leave(id);
        }
        let dropped_from_queue = self.roster.drop_stale_queued(&self.liveness, now);
        for id in &dropped_from_queue {
            info!(player_id = %id, "dropping inactive queued player");
        }
        Sweep {
            evicted,
            dropped_from_queue,
        }
    }

    fn require_host(&self, id: &PlayerId) -> Result<(), DomainError> {
        if self.roster.is_host(id) {
            Ok(())
        } else {
            Err(DomainError::unauthorized(
                UnauthorizedKind::NotHost,
                "only the host can do this",
            ))
        }
    }

    fn require_active(&self, id: &PlayerId) -> Result<&Player, DomainError> {
        self.roster
            .find_active(id)
            .ok_or_else(|| DomainError::player_not_found(id))
    }

    // ---- game lifecycle --------------------------------------------------

    pub fn start(&mut self, requester: &PlayerId, mode: Option<GameMode>) -> Result<(), DomainError> {
        self.require_host(requester)?;
        if self.turns.is_started() {
            return Err(DomainError::invalid_state(
                StateKind::AlreadyStarted,
                "game already started",
            ));
        }
        let active = self.roster.active_count();
        if active < self.settings.min_players {
            return Err(DomainError::invalid_state(
                StateKind::NotEnoughPlayers,
                format!(
                    "at least {} players are needed to start, {} present",
                    self.settings.min_players, active
                ),
            ));
        }

        self.turns.start()?;
        self.wheel.reset();
        if let Some(mode) = mode {
            self.mode = mode;
        }
        info!(player_id = %requester, mode = %self.mode, players = active, "game started");
        Ok(())
    }

    pub fn spin(&mut self, requester: &PlayerId, seed: u64) -> Result<Spin, DomainError> {
        self.require_host(requester)?;
        self.turns.require_started()?;

        let candidates = self
            .roster
            .active()
            .iter()
            .map(|p| Candidate {
                player_id: p.id.clone(),
                player_name: p.name.clone(),
            })
            .collect();
        let spin = self.wheel.spin(seed, candidates)?;
        info!(seed, winner_index = spin.winner_index, "wheel spinning");
        Ok(spin)
    }

    /// Finish the draw. The turn order is installed only on the
    /// Spinning → Finished transition; repeat calls leave turns untouched.
    pub fn finish_spin(&mut self) -> Result<Vec<PlayerId>, DomainError> {
        let was_spinning = self.wheel.phase() == WheelPhase::Spinning;
        let order = self.wheel.finish()?.to_vec();
        if was_spinning {
            self.turns.set_order(order.clone());
            info!(players = order.len(), "turn order drawn");
        }
        Ok(order)
    }

    pub fn advance(&mut self, requester: &PlayerId) -> Result<Advance, DomainError> {
        let advance = self.turns.advance(requester)?;
        debug!(
            player_id = %requester,
            next = ?advance.current_player_id,
            round = advance.current_round,
            "turn advanced"
        );
        Ok(advance)
    }

    // ---- turn actions ----------------------------------------------------

    /// Roll (or accept client-reported) dice for the current player and
    /// pre-select an opponent.
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        requester: &PlayerId,
        dice: Option<(u8, u8)>,
        rng: &mut R,
    ) -> Result<Rolled, DomainError> {
        self.turns.require_started()?;
        if self.turns.current_player() != Some(requester) {
            return Err(DomainError::unauthorized(
                UnauthorizedKind::NotCurrentTurn,
                "it is not your turn",
            ));
        }

        let roll = match dice {
            Some((die1, die2)) => dice::classify(self.mode, die1, die2)?,
            None => dice::roll(self.mode, rng),
        };
        self.shared.record_roll(roll.die1, roll.die2);

        let opponent = self.random_opponent(requester, rng);
        self.shared.set_opponent(opponent.as_deref());
        let current_opponent = self.shared.opponent.clone().unwrap_or_default();

        debug!(player_id = %requester, total = roll.total, event = ?roll.event, "dice rolled");
        Ok(Rolled {
            roll,
            current_opponent,
        })
    }

    fn random_opponent<R: Rng + ?Sized>(&self, requester: &PlayerId, rng: &mut R) -> Option<String> {
        let others: Vec<&Player> = self
            .roster
            .active()
            .iter()
            .filter(|p| &p.id != requester)
            .collect();
        others.choose(rng).map(|p| p.name.clone())
    }

    pub fn pick_opponent<R: Rng + ?Sized>(
        &mut self,
        requester: &PlayerId,
        rng: &mut R,
    ) -> Result<String, DomainError> {
        self.turns.require_started()?;
        let me = self.require_active(requester)?.name.clone();

        let opponent = self.random_opponent(requester, rng);
        self.shared.set_opponent(opponent.as_deref());
        self.shared.last_action = Some(match &opponent {
            Some(name) => format!("{me} faces {name}!"),
            None => "no other players to face".to_string(),
        });
        Ok(self.shared.opponent.clone().unwrap_or_default())
    }

    /// Any active player may choose the base, from the lobby as well.
    pub fn choose_base<R: Rng + ?Sized>(
        &mut self,
        requester: &PlayerId,
        color: Option<String>,
        rng: &mut R,
    ) -> Result<&SharedGameState, DomainError> {
        self.require_active(requester)?;
        self.shared.choose_base(color, rng);
        debug!(
            player_id = %requester,
            color = ?self.shared.base_color,
            actuator_id = ?self.shared.base_actuator,
            "base chosen"
        );
        Ok(&self.shared)
    }

    pub fn push_pour(&mut self, requester: &PlayerId, color: &str) -> Result<&[String], DomainError> {
        self.turns.require_started()?;
        self.require_active(requester)?;
        if color.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingField,
                "color must not be empty",
            ));
        }
        self.shared.push_pour(color.trim());
        Ok(&self.shared.pour_stack)
    }

    pub fn set_question(
        &mut self,
        requester: &PlayerId,
        question: String,
        answer: Option<String>,
    ) -> Result<(), DomainError> {
        self.turns.require_started()?;
        self.require_active(requester)?;
        self.shared.set_question(question, answer);
        Ok(())
    }

    // ---- scoring ---------------------------------------------------------

    fn standings(&self) -> Vec<Standing> {
        self.roster
            .active()
            .iter()
            .map(|p| Standing {
                player_id: p.id.clone(),
                player_name: p.name.clone(),
                score: self.scores.get(&p.id).unwrap_or(0),
            })
            .collect()
    }

    /// Apply a delta to an active player's score. In the threshold mode the
    /// outcome is evaluated in the same critical section.
    pub fn update_score(&mut self, player: &PlayerId, delta: i32) -> Result<ScoreUpdate, DomainError> {
        self.turns.require_started()?;
        self.require_active(player)?;
        let new_score = self.scores.apply(player, delta)?;

        if self.mode == GameMode::Drunk && !self.ended {
            let (loser, others): (Vec<Standing>, Vec<Standing>) = self
                .standings()
                .into_iter()
                .partition(|s| &s.player_id == player);
            if let Some(loser) = loser.into_iter().next() {
                if let Some(result) = threshold_outcome(loser, others) {
                    info!(player_id = %player, score = new_score, "drink limit reached; game over");
                    self.ended = true;
                    self.result = Some(result);
                }
            }
        }

        Ok(ScoreUpdate {
            player_id: player.clone(),
            score_delta: delta,
            new_score,
            game_ended: self.ended,
        })
    }

    /// Client-reported round completion. Only the round-count mode uses it.
    pub fn set_round(&mut self, requester: &PlayerId, round: u32) -> Result<RoundUpdate, DomainError> {
        self.turns.require_started()?;
        self.require_active(requester)?;

        if !self.mode.is_round_based() {
            return Ok(RoundUpdate {
                success: false,
                current_round: self.turns.round(),
                game_ended: self.ended,
                message: format!("{} mode does not count rounds", self.mode),
            });
        }

        self.turns.set_round(round);
        if !self.ended {
            if let Some(result) = round_outcome(round, &self.standings()) {
                info!(round, "round limit passed; game over");
                self.ended = true;
                self.result = Some(result);
            }
        }

        Ok(RoundUpdate {
            success: true,
            current_round: round,
            game_ended: self.ended,
            message: format!("round is now {round}"),
        })
    }

    // ---- events ----------------------------------------------------------

    /// Resolve a rule-engine event against the room's base actuator. A
    /// freshly picked actuator becomes the base so later reads agree.
    pub fn resolve_event<R: Rng + ?Sized>(
        &mut self,
        mode: &str,
        event: &str,
        score: Option<i32>,
        rng: &mut R,
    ) -> Result<Decision, DomainError> {
        let decision = events::resolve(mode, event, score, self.shared.base_actuator, rng)?;
        decision.checked_actions()?;
        if let Some(actuator_id) = decision.actuator_id() {
            self.shared.remember_actuator(actuator_id);
        }
        Ok(decision)
    }

    // ---- resets ----------------------------------------------------------

    /// New game with the same players: every active score goes back to 0.
    /// Host only.
    pub fn reset_game(&mut self, requester: &PlayerId) -> Result<(), DomainError> {
        self.require_host(requester)?;
        self.turns.reset();
        self.wheel.reset();
        self.shared.reset();
        self.ended = false;
        self.result = None;
        let ids: Vec<PlayerId> = self.roster.active().iter().map(|p| p.id.clone()).collect();
        for id in &ids {
            self.scores.enter(id);
        }
        info!(players = ids.len(), "game reset");
        Ok(())
    }

    /// Clear everything in place, players included. Host only.
    pub fn reset(&mut self, requester: &PlayerId) -> Result<(), DomainError> {
        self.require_host(requester)?;
        self.roster.clear();
        self.turns.reset();
        self.wheel.reset();
        self.scores.clear();
        self.shared.reset();
        self.mode = GameMode::default();
        self.ended = false;
        self.result = None;
        info!(player_id = %requester, "room reset");
        Ok(())
    }
}
