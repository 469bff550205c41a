//! Shared fixtures for the integration suites: services and a full router
//! wired over one in-memory database.

use std::sync::Arc;

use api_adapters::{build_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use services::{BoardService, CommentService};
use storage_adapters::MemoryDatabase;
use tower::ServiceExt;

/// Both services over a fresh database, plus the database for raw checks.
pub fn services() -> (BoardService, CommentService, MemoryDatabase) {
    let db = MemoryDatabase::new();
    let boards = Arc::new(db.board_repository());
    let comments = Arc::new(db.comment_repository());
    (
        BoardService::new(boards.clone()),
        CommentService::new(boards, comments),
        db,
    )
}

/// Full router over a fresh database.
pub fn app() -> (Router, MemoryDatabase) {
    let db = MemoryDatabase::new();
    let state = AppState::from_repositories(
        Arc::new(db.board_repository()),
        Arc::new(db.comment_repository()),
    );
    (build_router(state), db)
}

/// Sends a request and decodes the JSON body (`Value::Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");

    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, json)
}

/// Sends a raw body, for malformed-input cases.
pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
