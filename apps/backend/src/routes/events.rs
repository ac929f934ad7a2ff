//! Rule-engine entry point: (mode, event, score) → pours.

use actix_web::web;
use serde::Deserialize;
use tracing::info;

use crate::domain::events::Decision;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::DEFAULT_ROOM;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct EventRequest {
    mode: String,
    event: String,
    #[serde(default)]
    score: Option<i32>,
}

/// POST /api/game/event
///
/// The decision is computed under the room lock against the room's base
/// actuator. Pours are dispatched after the lock is released and the reply
/// does not wait for them. `success: false` decisions are normal replies.
async fn game_event(
    body: ValidatedJson<EventRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Decision>, AppError> {
    let mut rng = rand::rng();
    let decision = app_state.rooms.run(DEFAULT_ROOM, |room, _| {
        room.resolve_event(&body.mode, &body.event, body.score, &mut rng)
    })?;

    let actions = decision.checked_actions()?.to_vec();
    if !actions.is_empty() {
        info!(
            mode = %body.mode,
            event = %body.event,
            pours = actions.len(),
            actuator_id = ?decision.actuator_id(),
            "dispatching pours"
        );
        // Detached: the handle is dropped and the pour finishes on its own.
        drop(app_state.pours.dispatch(actions));
    }

    Ok(web::Json(decision))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/event", web::post().to(game_event));
}
