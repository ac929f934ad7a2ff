//! HTTP surface. Every route operates on the default room.

use actix_web::web;
use serde::Serialize;

pub mod events;
pub mod game;
pub mod health;
pub mod pumps;
pub mod questions;
pub mod room;
pub mod wheel;

/// `{success: true, message}` reply for commands with nothing else to say.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Register every route. `main.rs` and the test harness share this, so
/// both see the same paths; middleware is wrapped by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/room").configure(room::configure_routes));
    cfg.service(web::scope("/api/player").configure(room::configure_player_routes));
    cfg.service(web::scope("/api/wheel").configure(wheel::configure_routes));
    cfg.service(
        web::scope("/api/game")
            .configure(game::configure_routes)
            .configure(events::configure_routes),
    );
    cfg.service(web::scope("/api/pump").configure(pumps::configure_routes));
    cfg.service(web::scope("/api/questions").configure(questions::configure_routes));
}
