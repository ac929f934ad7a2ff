//! Viewer identity for read endpoints.
//!
//! Mutating endpoints carry `player_id` in their body. Reads take it from
//! the `player_id` cookie set at join, or the `x-player-id` header for
//! clients without cookies. The id is only a claim; the room validates it.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::PlayerId;
use crate::error::AppError;

pub const PLAYER_COOKIE: &str = "player_id";
pub const PLAYER_HEADER: &str = "x-player-id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller(pub Option<PlayerId>);

impl Caller {
    pub fn id(&self) -> Option<&PlayerId> {
        self.0.as_ref()
    }
}

fn non_empty(raw: &str) -> Option<PlayerId> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| PlayerId::from(trimmed))
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let from_cookie = req
            .cookie(PLAYER_COOKIE)
            .and_then(|c| non_empty(c.value()));
        let id = from_cookie.or_else(|| {
            req.headers()
                .get(PLAYER_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(non_empty)
        });
        ready(Ok(Caller(id)))
    }
}
