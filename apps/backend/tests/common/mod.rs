#![allow(dead_code)]

pub mod proptest_prelude;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use backend_test_support::responses::ok_json;
use serde_json::{json, Value};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub async fn post<S>(app: &S, uri: &str, body: Value) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    test::call_service(app, req).await
}

/// GET, optionally identifying the viewer through the `x-player-id` header.
pub async fn get_as<S>(app: &S, uri: &str, player_id: Option<&str>) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(id) = player_id {
        req = req.insert_header(("x-player-id", id));
    }
    test::call_service(app, req.to_request()).await
}

pub async fn join<S>(app: &S, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let body = ok_json(post(app, "/api/room/join", json!({ "player_name": name })).await).await;
    body["player_id"]
        .as_str()
        .expect("join returns a player_id")
        .to_string()
}

/// Join `names` (the first becomes host), start in `mode`, spin and finish.
/// Returns the player ids in drawn turn order.
pub async fn started_game<S>(app: &S, names: &[&str], mode: &str) -> Vec<String>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let mut ids = Vec::new();
    for name in names {
        ids.push(join(app, name).await);
    }
    let host = &ids[0];

    ok_json(post(app, "/api/room/start", json!({ "player_id": host, "mode": mode })).await).await;
    ok_json(post(app, "/api/wheel/spin", json!({ "player_id": host })).await).await;
    let finished = ok_json(post(app, "/api/wheel/finish", json!({})).await).await;

    finished["player_order"]
        .as_array()
        .expect("player_order array")
        .iter()
        .map(|e| e["player_id"].as_str().expect("player_id").to_string())
        .collect()
}
