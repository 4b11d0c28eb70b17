#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;
use wiremock::MockServer;

use peerloop_sessions::api::create_router;
use peerloop_sessions::config::Config;
use peerloop_sessions::state::AppState;

pub const API_PATH: &str = "/bigbluebutton/api/";
pub const CREATE_PATH: &str = "/bigbluebutton/api/create";
pub const TEST_SECRET: &str = "test-shared-secret";

pub const SUCCESS_BODY: &str = "<response><returncode>SUCCESS</returncode>\
    <meetingID>peerloop-course-42</meetingID><messageKey></messageKey></response>";
pub const DUPLICATE_BODY: &str = "<response><returncode>FAILED</returncode>\
    <messageKey>duplicateWarning</messageKey></response>";
pub const GENERIC_ERROR_BODY: &str = "<response><returncode>FAILED</returncode>\
    <messageKey>genericError</messageKey></response>";

pub fn test_config(bbb_url: String) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        bbb_url,
        bbb_secret: TEST_SECRET.to_string(),
        bbb_timeout_seconds: 1,
    }
}

pub fn app_for(server: &MockServer) -> Router {
    app_with_url(format!("{}{}", server.uri(), API_PATH))
}

pub fn app_with_url(bbb_url: String) -> Router {
    let state = tokio_test::assert_ok!(AppState::new(&test_config(bbb_url)));
    create_router(state)
}

pub async fn send(app: Router, request: Request<Body>) -> (Response<Body>, Value) {
    let response = app
        .oneshot(request)
        .await
        .expect("Failed to execute request");
    let (parts, body) = response.into_parts();
    let bytes = body
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (Response::from_parts(parts, Body::empty()), json)
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("origin", "https://app.peerloop.example")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Split a URL query into `(key, raw value)` pairs without decoding
pub fn raw_query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            Some((k.to_string(), v.to_string()))
        })
        .collect()
}

/// Separate `...&checksum=<hex>` from the signed part of a query
pub fn split_checksum(query: &str) -> (&str, &str) {
    query
        .rsplit_once("&checksum=")
        .expect("Query should end with a checksum")
}

pub fn is_sha1_hex(s: &str) -> bool {
    s.len() == 40
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
