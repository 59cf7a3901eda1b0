//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use awaji_board::StoryText;
use awaji_progression::application::engine::{Engine, EngineConfig};
use awaji_test_support::{SequenceRng, fixed_clock};
use http_body_util::BodyExt;
use tower::ServiceExt;

use awaji_api::routes;
use awaji_api::session::GameSession;
use awaji_api::state::AppState;

/// Longer than any single scheduled continuation.
pub const ROLL_SETTLE: Duration = Duration::from_millis(600);

/// Build a session with placeholder labels, the default delays and a
/// scripted die.
pub fn build_session(rolls: Vec<u32>) -> Arc<GameSession> {
    let engine = Engine::new(
        StoryText::default(),
        EngineConfig::default(),
        Arc::new(fixed_clock()),
        Box::new(SequenceRng::new(rolls)),
    );
    GameSession::new(engine)
}

/// Build the full app router around `session`. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(session: Arc<GameSession>) -> Router {
    routes::app_router(AppState::new(session))
}

/// Lets the engine finish a walk of `steps` cells.
pub async fn wait_for_steps(steps: u32) {
    tokio::time::sleep(EngineConfig::default().step_delay * (steps + 1)).await;
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Roll, wait for the die to settle, acknowledge it and wait for the marker
/// to stop. Returns the snapshot after the walk.
pub async fn roll_and_walk(app: &Router, face: u32) -> serde_json::Value {
    let (status, json) = post(app.clone(), "/api/v1/game/roll").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "rolling");

    tokio::time::sleep(ROLL_SETTLE).await;

    let (status, json) = post(app.clone(), "/api/v1/game/acknowledge-roll").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "moving");
    assert_eq!(json["last_roll"], face);

    wait_for_steps(face).await;

    let (_, json) = get_json(app.clone(), "/api/v1/game").await;
    json
}
