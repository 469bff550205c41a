//! The uniform `{resultCode, result}` envelope.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome name carried by every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Success,
    BoardNotFound,
    CommentNotFound,
    InvalidRequest,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub result_code: ResultCode,
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            result_code: ResultCode::Success,
            result: Some(result),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload; `result` serializes as `null`.
    pub fn empty() -> Self {
        Self {
            result_code: ResultCode::Success,
            result: None,
        }
    }

    pub fn error(code: ResultCode) -> Self {
        Self {
            result_code: code,
            result: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
