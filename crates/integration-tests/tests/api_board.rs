use axum::http::{Method, StatusCode};
use integration_tests::{app, send, send_raw};
use serde_json::json;

#[tokio::test]
async fn create_board_round_trips_fields() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/boards",
        Some(json!({ "title": "t", "content": "c", "username": "u" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resultCode"], "SUCCESS");
    let board = &body["result"];
    assert_eq!(board["id"], 1);
    assert_eq!(board["title"], "t");
    assert_eq!(board["content"], "c");
    assert_eq!(board["username"], "u");
    assert_eq!(board["createdAt"], board["updatedAt"]);
    assert!(board.get("deletedAt").is_none());
}

#[tokio::test]
async fn list_boards_starts_empty() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/boards", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "resultCode": "SUCCESS", "result": [] }));
}

#[tokio::test]
async fn missing_board_is_404_envelope() {
    let (app, _) = app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/api/boards/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "resultCode": "BOARD_NOT_FOUND", "result": null }));
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/boards/7",
        Some(json!({ "title": "t", "content": "c", "username": "u" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["resultCode"], "BOARD_NOT_FOUND");
}

#[tokio::test]
async fn malformed_bodies_are_400() {
    let (app, _) = app();

    let (status, body) = send_raw(&app, Method::POST, "/api/boards", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "resultCode": "INVALID_REQUEST", "result": null }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/boards",
        Some(json!({ "title": "t", "username": "u" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["resultCode"], "INVALID_REQUEST");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/boards",
        Some(json!({ "title": null, "content": "c", "username": "u" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["resultCode"], "INVALID_REQUEST");
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/boards/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["resultCode"], "INVALID_REQUEST");
}

#[tokio::test]
async fn update_ignores_username_in_body() {
    let (app, _) = app();
    send(
        &app,
        Method::POST,
        "/api/boards",
        Some(json!({ "title": "T", "content": "C", "username": "U" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/boards/1",
        Some(json!({ "title": "T2", "content": "C2", "username": "someone-else" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let board = &body["result"];
    assert_eq!(board["id"], 1);
    assert_eq!(board["title"], "T2");
    assert_eq!(board["content"], "C2");
    assert_eq!(board["username"], "U");
}

#[tokio::test]
async fn lifecycle_over_http() {
    let (app, db) = app();

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/boards",
        Some(json!({ "title": "T", "content": "C", "username": "U" })),
    )
    .await;
    assert_eq!(created["result"]["id"], 1);

    let (status, deleted) = send(&app, Method::DELETE, "/api/boards/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "resultCode": "SUCCESS", "result": null }));

    let (status, _) = send(&app, Method::GET, "/api/boards/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/boards/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&app, Method::GET, "/api/boards", None).await;
    assert_eq!(listed["result"], json!([]));

    assert!(db.board_row(1).await.unwrap().deleted_at().is_some());
}

#[tokio::test]
async fn unknown_paths_get_the_envelope() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "resultCode": "NOT_FOUND", "result": null }));
}

#[tokio::test]
async fn unsupported_methods_get_the_envelope() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::PATCH, "/api/boards/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "resultCode": "METHOD_NOT_ALLOWED", "result": null }));

    let (status, body) = send(&app, Method::GET, "/api/comments/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["resultCode"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let (app, _) = app();

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().expect("paths object");
    for path in [
        "/api/boards",
        "/api/boards/{board_id}",
        "/api/boards/{board_id}/comments",
        "/api/comments/{comment_id}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
