//! Raw actuator commands for hardware checks.

use actix_web::web;
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::routes::Ack;
use crate::services::pours::STOP_ALL;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct PourRequest {
    /// Older clients send the pump number as `player_id`.
    #[serde(alias = "player_id")]
    actuator_id: u8,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StopRequest {
    #[serde(alias = "player_id")]
    actuator_id: u8,
}

/// POST /api/pump/out
///
/// Waits for the pour to finish and reports actuator failures.
async fn pour_out(
    body: ValidatedJson<PourRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Ack>, AppError> {
    app_state.pours.pour_now(body.actuator_id, body.duration).await?;
    Ok(web::Json(Ack::ok(format!("pump {} ran", body.actuator_id))))
}

/// POST /api/pump/stop
///
/// `actuator_id: 0` stops every pump.
async fn stop(
    body: ValidatedJson<StopRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Ack>, AppError> {
    app_state.pours.stop(body.actuator_id).await?;
    let message = if body.actuator_id == STOP_ALL {
        "all pumps stopped".to_string()
    } else {
        format!("pump {} stopped", body.actuator_id)
    };
    Ok(web::Json(Ack::ok(message)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/out", web::post().to(pour_out))
        .route("/stop", web::post().to(stop));
}
