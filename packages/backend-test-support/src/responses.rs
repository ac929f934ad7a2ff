//! Success-path response helpers.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde_json::Value;

/// Assert `200 OK` and return the JSON body.
pub async fn ok_json(resp: ServiceResponse<BoxBody>) -> Value {
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "expected 200, body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("body should be JSON")
}

/// Value of a `Set-Cookie` header for `name`, if the response sets one.
pub fn set_cookie_value(resp: &ServiceResponse<BoxBody>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}
