//! # Handlers
//!
//! One module per endpoint group. Each handler makes exactly one service
//! call and never formats errors itself.

pub mod boards;
pub mod comments;

use axum::http::{Method, Uri};

use crate::error::ApiError;
use crate::response::ApiResponse;

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Fallback for paths no route matches.
pub async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::UnknownRoute(uri.path().to_owned())
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}
