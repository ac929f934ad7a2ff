//! Turn-order draw.

use actix_web::web;
use rand::Rng;
use serde::Serialize;

use crate::domain::rules::{SPIN_SEED_MAX, SPIN_SEED_MIN};
use crate::domain::snapshot::{wheel_snapshot, OrderEntry, WheelSnapshot};
use crate::domain::wheel::Spin;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::routes::room::ActorRequest;
use crate::services::DEFAULT_ROOM;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct SpinResponse {
    success: bool,
    message: &'static str,
    #[serde(flatten)]
    spin: Spin,
}

#[derive(Debug, Serialize)]
struct FinishResponse {
    success: bool,
    message: &'static str,
    player_order: Vec<OrderEntry>,
}

/// POST /api/wheel/spin
///
/// Host only, once the game has started. Clients animate with the returned
/// seed and winner index; the candidate list is frozen from here on.
async fn spin(
    body: ValidatedJson<ActorRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SpinResponse>, AppError> {
    let seed = rand::rng().random_range(SPIN_SEED_MIN..=SPIN_SEED_MAX);
    let spin = app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| room.spin(&body.player_id, seed))?;

    Ok(web::Json(SpinResponse {
        success: true,
        message: "wheel spinning",
        spin,
    }))
}

/// POST /api/wheel/finish
///
/// Idempotent: every polling client may call it when its animation ends and
/// all of them get the same order.
async fn finish(app_state: web::Data<AppState>) -> Result<web::Json<FinishResponse>, AppError> {
    let player_order = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.finish_spin()?;
        Ok(wheel_snapshot(room).player_order)
    })?;

    Ok(web::Json(FinishResponse {
        success: true,
        message: "turn order drawn",
        player_order,
    }))
}

/// GET /api/wheel/state
async fn state(app_state: web::Data<AppState>) -> Result<web::Json<WheelSnapshot>, AppError> {
    let snapshot = app_state
        .rooms
        .run(DEFAULT_ROOM, |room, _| Ok(wheel_snapshot(room)))?;
    Ok(web::Json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/spin", web::post().to(spin))
        .route("/finish", web::post().to(finish))
        .route("/state", web::get().to(state));
}
