//! board-comment/crates/api-adapters/src/middleware.rs
//!
//! Request pipeline stages: error translation, panic capture, CORS.

use std::any::Any;

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use domains::EntityKind;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::{error, warn};

use crate::error::{ApiError, ErrorKind, Failure};
use crate::response::{ApiResponse, ResultCode};

/// The error translator.
///
/// Looks for a [`Failure`] left by a handler or extractor and replaces the
/// response with the error envelope. Responses without one pass through.
pub async fn translate_errors(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;
    let Some(failure) = response.extensions_mut().remove::<Failure>() else {
        return response;
    };

    let (status, code) = match failure.kind {
        ErrorKind::NotFound(EntityKind::Board) => (StatusCode::NOT_FOUND, ResultCode::BoardNotFound),
        ErrorKind::NotFound(EntityKind::Comment) => {
            (StatusCode::NOT_FOUND, ResultCode::CommentNotFound)
        }
        ErrorKind::UnknownRoute => (StatusCode::NOT_FOUND, ResultCode::NotFound),
        ErrorKind::MethodNotAllowed => {
            (StatusCode::METHOD_NOT_ALLOWED, ResultCode::MethodNotAllowed)
        }
        ErrorKind::MalformedInput => (StatusCode::BAD_REQUEST, ResultCode::InvalidRequest),
        ErrorKind::Internal => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ResultCode::InternalServerError,
        ),
    };

    if status.is_server_error() {
        error!(%method, %uri, detail = %failure.detail, "request failed");
    } else {
        warn!(%method, %uri, status = status.as_u16(), detail = %failure.detail, "request rejected");
    }

    (status, ApiResponse::error(code)).into_response()
}

/// Turns a caught panic into an internal failure for [`translate_errors`].
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    ApiError::Panicked(message).into_response()
}

/// Configures CORS (Cross-Origin Resource Sharing).
pub fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AnyOrigin)
        .max_age(std::time::Duration::from_secs(3600))
}
