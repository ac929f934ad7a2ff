//! Membership, liveness and lobby lifecycle.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::membership::{Admission, Departure};
use crate::domain::snapshot::{player_status, room_snapshot, PlayerStatus, RoomSnapshot};
use crate::domain::{GameMode, PlayerId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::extractors::caller::{Caller, PLAYER_COOKIE};
use crate::extractors::ValidatedJson;
use crate::routes::Ack;
use crate::services::DEFAULT_ROOM;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct JoinRequest {
    player_name: String,
}

#[derive(Debug, Serialize)]
struct JoinResponse {
    success: bool,
    player_id: PlayerId,
    status: &'static str,
    queue_position: Option<usize>,
    message: String,
    room_state: RoomSnapshot,
}

/// Body of every command that only identifies its actor.
#[derive(Debug, Deserialize)]
pub struct ActorRequest {
    pub player_id: PlayerId,
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    player_id: PlayerId,
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Serialize)]
struct StartResponse {
    success: bool,
    message: String,
    mode: GameMode,
}

#[derive(Debug, Serialize)]
struct HeartbeatResponse {
    success: bool,
    /// False when the id is neither active nor queued.
    known: bool,
}

fn player_cookie(player_id: &PlayerId) -> Cookie<'static> {
    Cookie::build(PLAYER_COOKIE, player_id.to_string())
        .path("/")
        .max_age(CookieDuration::hours(1))
        .same_site(SameSite::Lax)
        .http_only(false)
        .finish()
}

/// POST /api/room/join
///
/// Always succeeds: the player is either seated or queued. The issued id is returned and set as the `player_id` cookie.
async fn join(
    body: ValidatedJson<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (joined, room_state) = app_state.rooms.run(DEFAULT_ROOM, |room, now| {
        let joined = room.join(&body.player_name, now);
        let snapshot = room_snapshot(room, Some(&joined.player_id));
        Ok((joined, snapshot))
    })?;

    let (status, queue_position, message) = match joined.admission {
        Admission::Active => ("active", None, "joined the room".to_string()),
        Admission::Queued { position } => (
            "queued",
            Some(position),
            format!("room is full; you are number {position} in the queue"),
        ),
    };

    Ok(HttpResponse::Ok()
        .cookie(player_cookie(&joined.player_id))
        .json(JoinResponse {
            success: true,
            player_id: joined.player_id,
            status,
            queue_position,
            message,
            room_state,
        }))
}

/// POST /api/room/leave
async fn leave(
    body: ValidatedJson<ActorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Ack>, AppError> {
    let departure = app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| Ok(room.leave(&body.player_id)))?;

    let message = match departure {
        Departure::Left { .. } => "left the room",
        Departure::Dequeued => "left the queue",
        Departure::Unknown => "not in the room",
    };
    Ok(web::Json(Ack::ok(message)))
}

/// POST /api/room/heartbeat
async fn heartbeat(
    body: ValidatedJson<ActorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<HeartbeatResponse>, AppError> {
    let known = app_state.rooms.heartbeat(DEFAULT_ROOM, &body.player_id)?;
    Ok(web::Json(HeartbeatResponse {
        success: true,
        known,
    }))
}

/// GET /api/room/state
async fn state(
    caller: Caller,
    app_state: web::Data<AppState>,
) -> Result<web::Json<RoomSnapshot>, AppError> {
    let snapshot = app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| Ok(room_snapshot(room, caller.id())))?;
    Ok(web::Json(snapshot))
}

/// GET /api/player/state
async fn player_state(
    caller: Caller,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlayerStatus>, AppError> {
    let status = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        Ok(match caller.id() {
            Some(id) => player_status(room, id),
            None => PlayerStatus::NotFound,
        })
    })?;
    Ok(web::Json(status))
}

/// POST /api/room/start
async fn start(
    body: ValidatedJson<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<StartResponse>, AppError> {
    let mode = body
        .mode
        .as_deref()
        .map(|name| {
            GameMode::parse(name).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidMode,
                    format!("unknown game mode '{name}'"),
                )
            })
        })
        .transpose()?;

    let mode = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.start(&body.player_id, mode)?;
        Ok(room.mode())
    })?;

    Ok(web::Json(StartResponse {
        success: true,
        message: "game started; spin the wheel".to_string(),
        mode,
    }))
}

/// POST /api/room/reset
///
/// Host only; removes every player, the host included.
async fn reset(
    body: ValidatedJson<ActorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Ack>, AppError> {
    app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| room.reset(&body.player_id))?;
    Ok(web::Json(Ack::ok("room reset")))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/join", web::post().to(join))
        .route("/leave", web::post().to(leave))
        .route("/heartbeat", web::post().to(heartbeat))
        .route("/state", web::get().to(state))
        .route("/start", web::post().to(start))
        .route("/reset", web::post().to(reset));
}

pub fn configure_player_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/state", web::get().to(player_state));
}
