//! Handler-side errors and the extractors that feed them.
//!
//! An [`ApiError`] does not render itself. Its `IntoResponse` impl only
//! attaches a [`Failure`] to the response; the error translator middleware
//! decides status and body.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domains::{DomainError, EntityKind};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound(EntityKind),
    UnknownRoute,
    MethodNotAllowed,
    MalformedInput,
    Internal,
}

/// Marker left in response extensions for the error translator.
#[derive(Debug, Clone)]
pub struct Failure {
    pub kind: ErrorKind,
    /// Internal description. Logged, never sent to the client.
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("malformed request: {0}")]
    MalformedInput(String),

    #[error("no route for {0}")]
    UnknownRoute(String),

    #[error("method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(DomainError::NotFound { kind, .. }) => ErrorKind::NotFound(*kind),
            Self::Domain(DomainError::Storage(_)) => ErrorKind::Internal,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::UnknownRoute(_) => ErrorKind::UnknownRoute,
            Self::MethodNotAllowed { .. } => ErrorKind::MethodNotAllowed,
            Self::Panicked(_) => ErrorKind::Internal,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let failure = Failure {
            kind: self.kind(),
            detail: self.to_string(),
        };
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

/// `axum::Json` whose rejection becomes [`ApiError::MalformedInput`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` whose rejection becomes [`ApiError::MalformedInput`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_are_internal() {
        let err = ApiError::from(DomainError::Storage(anyhow::anyhow!("pool timed out")));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn not_found_keeps_entity_kind() {
        let err = ApiError::from(DomainError::comment_not_found(4));
        assert_eq!(err.kind(), ErrorKind::NotFound(EntityKind::Comment));
    }

    #[test]
    fn into_response_only_attaches_failure() {
        let response = ApiError::MalformedInput("bad".into()).into_response();
        let failure = response.extensions().get::<Failure>().unwrap();
        assert_eq!(failure.kind, ErrorKind::MalformedInput);
        assert!(failure.detail.contains("bad"));
    }

    #[test]
    fn routing_failures_have_their_own_kinds() {
        let err = ApiError::MethodNotAllowed {
            method: "PATCH".into(),
            path: "/api/boards/1".into(),
        };
        assert_eq!(err.kind(), ErrorKind::MethodNotAllowed);
        assert_eq!(
            ApiError::UnknownRoute("/api/nope".into()).kind(),
            ErrorKind::UnknownRoute
        );
    }
}
