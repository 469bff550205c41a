//! # api-adapters
//!
//! The HTTP surface of the board-comment service.
//!
//! Handlers extract parameters, call exactly one service operation and wrap
//! the value in [`ApiResponse`]. Failures leave the handler as [`ApiError`]
//! and are rendered by [`middleware::translate_errors`], the only place that
//! turns an error into a status code and body.

pub mod docs;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;

pub use error::ApiError;
pub use response::{ApiResponse, ResultCode};
pub use state::AppState;

use axum::routing::{get, put};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{boards, comments};

/// Routes mounted under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/boards", get(boards::get_boards).post(boards::create_board))
        .route(
            "/boards/{board_id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route(
            "/boards/{board_id}/comments",
            get(comments::get_comments).post(comments::create_comment),
        )
        .route(
            "/comments/{comment_id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
}

/// Builds the full application router.
///
/// Unmatched paths and methods fall back to handlers that fail like any
/// other route. Layer order, outermost first: request id, tracing, CORS,
/// error translation, panic capture. Panics are turned into an internal failure
/// inside the translator so they get the same envelope as any other error.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .fallback(handlers::unknown_route)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::translate_errors))
        .layer(middleware::cors_policy())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
