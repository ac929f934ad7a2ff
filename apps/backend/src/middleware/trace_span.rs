//! Per-request tracing span.
//!
//! Opens a span named "request" carrying `trace_id`, `method`, `path` and
//! the caller's claimed `player_id` (when present), and instruments the
//! downstream future so every event logged by a handler inherits them.
//!
//! Expects `RequestTrace` to have stored the trace id in request
//! extensions, so it must sit inside it:
//!
//! ```text
//! App::new()
//!     .wrap(TraceSpan)        // innermost: reads trace_id, opens the span
//!     .wrap(StructuredLogger)
//!     .wrap(RequestTrace)     // outermost: generates trace_id, sets header
//! ```
//!
//! Actix runs the last `.wrap` first.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{field, info_span, Instrument};

use crate::extractors::caller::{PLAYER_COOKIE, PLAYER_HEADER};

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

fn claimed_player(req: &ServiceRequest) -> Option<String> {
    req.cookie(PLAYER_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            req.headers()
                .get(PLAYER_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .filter(|id| !id.trim().is_empty())
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "missing-trace-id".to_string());

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
            player_id = field::Empty,
        );
        if let Some(player) = claimed_player(&req) {
            span.record("player_id", field::display(player));
        }

        Box::pin(self.service.call(req).instrument(span))
    }
}
