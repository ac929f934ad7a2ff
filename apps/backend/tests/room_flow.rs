mod common;

use actix_web::http::StatusCode;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::responses::{ok_json, set_cookie_value};
use cheers_backend::domain::RoomSettings;
use cheers_backend::test_support::{create_test_app_builder, recording_state, recording_state_with};
use common::{get_as, join, post};
use serde_json::json;

#[actix_web::test]
async fn join_sets_cookie_and_seats_first_player_as_host() {
    let (state, _) = recording_state();
    let app = create_test_app_builder(state).build().await;

    let resp = post(&app, "/api/room/join", json!({ "player_name": "Ada" })).await;
    let cookie = set_cookie_value(&resp, "player_id");
    let body = ok_json(resp).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "active");
    assert!(body["queue_position"].is_null());
    assert_eq!(cookie.as_deref(), body["player_id"].as_str());
    assert_eq!(body["room_state"]["host_id"], body["player_id"]);
    assert_eq!(body["room_state"]["is_host"], true);
}

#[actix_web::test]
async fn seventh_join_is_queued_first() {
    let (state, _) = recording_state();
    let app = create_test_app_builder(state).build().await;

    for i in 0..6 {
        join(&app, &format!("p{i}")).await;
    }
    let body = ok_json(post(&app, "/api/room/join", json!({ "player_name": "late" })).await).await;

    assert_eq!(body["status"], "queued");
    assert_eq!(body["queue_position"], 1);
    assert_eq!(body["room_state"]["player_count"], 6);
    assert_eq!(body["room_state"]["queued_count"], 1);
}

#[actix_web::test]
async fn blank_name_still_joins_with_a_placeholder() {
    let (state, _) = recording_state();
    let app = create_test_app_builder(state).build().await;

    for name in ["", "   "] {
        let body = ok_json(post(&app, "/api/room/join", json!({ "player_name": name })).await).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], "active");
    }

    let room = ok_json(get_as(&app, "/api/room/state", None).await).await;
    assert_eq!(room["player_count"], 2);
    assert_eq!(room["players"][0]["player_name"], "Player");
    assert_eq!(room["players"][1]["player_name"], "Player");
}

#[actix_web::test]
async fn host_leaving_hands_over_and_promotes_queue_head() {
    let (state, _) = recording_state_with(RoomSettings {
        capacity: 2,
        ..RoomSettings::default()
    });
    let app = create_test_app_builder(state).build().await;

    let host = join(&app, "host").await;
    let second = join(&app, "second").await;
    let waiting = join(&app, "waiting").await;

    let body = ok_json(post(&app, "/api/room/leave", json!({ "player_id": host })).await).await;
    assert_eq!(body["message"], "left the room");

    let room = ok_json(get_as(&app, "/api/room/state", Some(&waiting)).await).await;
    assert_eq!(room["host_id"], second.as_str());
    assert_eq!(room["player_count"], 2);
    assert_eq!(room["queued_count"], 0);
    assert_eq!(room["is_in_room"], true);
    assert_eq!(room["player_scores"][&waiting], 0);
}

#[actix_web::test]
async fn player_state_reports_screen_queue_and_unknown() {
    let (state, _) = recording_state_with(RoomSettings {
        capacity: 1,
        ..RoomSettings::default()
    });
    let app = create_test_app_builder(state).build().await;

    let seated = join(&app, "seated").await;
    let queued = join(&app, "queued").await;

    let body = ok_json(get_as(&app, "/api/player/state", Some(&seated)).await).await;
    assert_eq!(body, json!({ "status": "in_game", "screen": "setup", "is_host": true }));

    let body = ok_json(get_as(&app, "/api/player/state", Some(&queued)).await).await;
    assert_eq!(body, json!({ "status": "in_queue", "queue_position": 1 }));

    let body = ok_json(get_as(&app, "/api/player/state", None).await).await;
    assert_eq!(body, json!({ "status": "not_found" }));
}

#[actix_web::test]
async fn heartbeat_reports_whether_the_id_is_known() {
    let (state, _) = recording_state();
    let app = create_test_app_builder(state).build().await;
    let id = join(&app, "a").await;

    let body = ok_json(post(&app, "/api/room/heartbeat", json!({ "player_id": id })).await).await;
    assert_eq!(body, json!({ "success": true, "known": true }));

    let body =
        ok_json(post(&app, "/api/room/heartbeat", json!({ "player_id": "ghost" })).await).await;
    assert_eq!(body["known"], false);
}

#[actix_web::test]
async fn start_requires_host_and_enough_players() {
    let (state, _) = recording_state();
    let app = create_test_app_builder(state).build().await;
    let host = join(&app, "host").await;

    let resp = post(&app, "/api/room/start", json!({ "player_id": host })).await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_ENOUGH_PLAYERS",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let guest = join(&app, "guest").await;
    let resp = post(&app, "/api/room/start", json!({ "player_id": guest })).await;
    assert_problem_details_from_service_response(resp, "NOT_HOST", StatusCode::FORBIDDEN, None)
        .await;

    let resp = post(&app, "/api/room/start", json!({ "player_id": host, "mode": "karaoke" })).await;
    assert_problem_details_from_service_response(resp, "INVALID_MODE", StatusCode::BAD_REQUEST, None)
        .await;

    let body =
        ok_json(post(&app, "/api/room/start", json!({ "player_id": host, "mode": "drunk" })).await)
            .await;
    assert_eq!(body["mode"], "drunk");

    let resp = post(&app, "/api/room/start", json!({ "player_id": host })).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_ALREADY_STARTED",
        StatusCode::CONFLICT,
        None,
    )
    .await;
}

#[actix_web::test]
async fn room_reset_is_host_only_and_clears_players() {
    let (state, _) = recording_state();
    let app = create_test_app_builder(state).build().await;
    let host = join(&app, "a").await;
    let guest = join(&app, "b").await;

    let resp = post(&app, "/api/room/reset", json!({ "player_id": "ghost" })).await;
    assert_problem_details_from_service_response(resp, "NOT_HOST", StatusCode::FORBIDDEN, None)
        .await;
    let resp = post(&app, "/api/room/reset", json!({ "player_id": guest })).await;
    assert_problem_details_from_service_response(resp, "NOT_HOST", StatusCode::FORBIDDEN, None)
        .await;
    let resp = post(&app, "/api/room/reset", json!({})).await;
    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None)
        .await;

    let room = ok_json(get_as(&app, "/api/room/state", None).await).await;
    assert_eq!(room["player_count"], 2);

    ok_json(post(&app, "/api/room/reset", json!({ "player_id": host })).await).await;

    let room = ok_json(get_as(&app, "/api/room/state", Some(&host)).await).await;
    assert_eq!(room["player_count"], 0);
    assert!(room["host_id"].is_null());
    assert_eq!(room["is_in_room"], false);
}
