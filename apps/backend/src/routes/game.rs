//! In-game actions: turns, dice, shared screen, scores and rounds.
//!
//! Every handler runs under the room lock via `RoomService::run`, so the
//! authorization check and the write it guards are one critical section.

use actix_web::web;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::room::{Rolled, RoundUpdate, ScoreUpdate};
use crate::domain::snapshot::{game_snapshot, RoomSnapshot};
use crate::domain::turns::Advance;
use crate::domain::PlayerId;
use crate::error::AppError;
use crate::extractors::{Caller, ValidatedJson};
use crate::routes::room::ActorRequest;
use crate::services::DEFAULT_ROOM;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct RollRequest {
    player_id: PlayerId,
    #[serde(default)]
    dice1: Option<u8>,
    #[serde(default)]
    dice2: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct BaseColorRequest {
    player_id: PlayerId,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StackRequest {
    player_id: PlayerId,
    color: String,
}

#[derive(Debug, Deserialize)]
struct QuestionRequest {
    player_id: PlayerId,
    question: String,
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    player_id: PlayerId,
    score_delta: i32,
}

#[derive(Debug, Deserialize)]
struct RoundRequest {
    player_id: PlayerId,
    new_round: u32,
}

#[derive(Debug, Serialize)]
struct AdvanceResponse {
    success: bool,
    #[serde(flatten)]
    advance: Advance,
}

#[derive(Debug, Serialize)]
struct RollResponse {
    success: bool,
    dice_values: [u8; 2],
    #[serde(flatten)]
    rolled: Rolled,
}

#[derive(Debug, Serialize)]
struct BaseColorResponse {
    success: bool,
    base_color: Option<String>,
    base_actuator: Option<u8>,
    pour_stack: Vec<String>,
}

#[derive(Debug, Serialize)]
struct StackResponse {
    success: bool,
    color: String,
    pour_stack: Vec<String>,
}

#[derive(Debug, Serialize)]
struct QuestionResponse {
    success: bool,
    question: String,
    answer: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    success: bool,
    message: String,
    #[serde(flatten)]
    update: ScoreUpdate,
}

#[derive(Debug, Serialize)]
struct OpponentResponse {
    success: bool,
    current_opponent: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct GameResetResponse {
    success: bool,
    message: &'static str,
    current_round: u32,
}

/// GET /api/game/state
async fn state(
    caller: Caller,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RoomSnapshot>, AppError> {
    let snapshot = app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| game_snapshot(room, caller.id()))?;
    Ok(web::Json(snapshot))
}

/// POST /api/game/next-turn
async fn next_turn(
    body: ValidatedJson<ActorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<AdvanceResponse>, AppError> {
    let advance = app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| room.advance(&body.player_id))?;
    Ok(web::Json(AdvanceResponse {
        success: true,
        advance,
    }))
}

/// POST /api/game/roll-dice
///
/// Client-reported dice are used when both faces are given; otherwise the
/// server rolls.
async fn roll_dice(
    body: ValidatedJson<RollRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RollResponse>, AppError> {
    let dice = body.dice1.zip(body.dice2);
    let mut rng = rand::rng();
    let rolled = app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| room.roll(&body.player_id, dice, &mut rng))?;

    Ok(web::Json(RollResponse {
        success: true,
        dice_values: [rolled.roll.die1, rolled.roll.die2],
        rolled,
    }))
}

/// POST /api/game/set-base-color
///
/// Allowed from the lobby for any active player.
async fn set_base_color(
    body: ValidatedJson<BaseColorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<BaseColorResponse>, AppError> {
    let BaseColorRequest { player_id, color } = body.into_inner();
    debug!(player_id = %player_id, requested = ?color, "choosing base");

    let mut rng = rand::rng();
    let shared = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.choose_base(&player_id, color, &mut rng).cloned()
    })?;

    Ok(web::Json(BaseColorResponse {
        success: true,
        base_color: shared.base_color,
        base_actuator: shared.base_actuator,
        pour_stack: shared.pour_stack,
    }))
}

/// POST /api/game/add-to-stack
async fn add_to_stack(
    body: ValidatedJson<StackRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<StackResponse>, AppError> {
    let pour_stack = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.push_pour(&body.player_id, &body.color)
            .map(<[String]>::to_vec)
    })?;

    Ok(web::Json(StackResponse {
        success: true,
        color: body.color.trim().to_string(),
        pour_stack,
    }))
}

/// POST /api/game/set-question
async fn set_question(
    body: ValidatedJson<QuestionRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<QuestionResponse>, AppError> {
    let QuestionRequest {
        player_id,
        question,
        answer,
    } = body.into_inner();

    app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.set_question(&player_id, question.clone(), answer.clone())
    })?;

    Ok(web::Json(QuestionResponse {
        success: true,
        question,
        answer,
    }))
}

/// POST /api/game/update-score
async fn update_score(
    body: ValidatedJson<ScoreRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<ScoreResponse>, AppError> {
    let update = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.update_score(&body.player_id, body.score_delta)
    })?;

    Ok(web::Json(ScoreResponse {
        success: true,
        message: format!("score is now {}", update.new_score),
        update,
    }))
}

/// POST /api/game/set-round
///
/// Outside the round-count mode this is a `success: false` reply, not an
/// error.
async fn set_round(
    body: ValidatedJson<RoundRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RoundUpdate>, AppError> {
    let update = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.set_round(&body.player_id, body.new_round)
    })?;
    Ok(web::Json(update))
}

/// POST /api/game/pick-opponent
async fn pick_opponent(
    body: ValidatedJson<ActorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<OpponentResponse>, AppError> {
    let mut rng = rand::rng();
    let current_opponent = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.pick_opponent(&body.player_id, &mut rng)
    })?;

    Ok(web::Json(OpponentResponse {
        success: true,
        message: format!("opponent is {current_opponent}"),
        current_opponent,
    }))
}

/// POST /api/game/reset
///
/// New game with the same players. Host only.
async fn reset(
    body: ValidatedJson<ActorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameResetResponse>, AppError> {
    let current_round = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.reset_game(&body.player_id)?;
        Ok(room.turns().round())
    })?;

    Ok(web::Json(GameResetResponse {
        success: true,
        message: "game reset",
        current_round,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/state", web::get().to(state))
        .route("/next-turn", web::post().to(next_turn))
        .route("/roll-dice", web::post().to(roll_dice))
        .route("/set-base-color", web::post().to(set_base_color))
        .route("/add-to-stack", web::post().to(add_to_stack))
        .route("/set-question", web::post().to(set_question))
        .route("/update-score", web::post().to(update_score))
        .route("/set-round", web::post().to(set_round))
        .route("/pick-opponent", web::post().to(pick_opponent))
        .route("/reset", web::post().to(reset));
}
