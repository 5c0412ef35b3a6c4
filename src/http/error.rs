//! Mapping of service failures onto HTTP responses.

use crate::task::{domain::TaskValidationError, services::TaskServiceError};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Machine-checkable error kind, e.g. `not_found`.
    pub kind: &'static str,
    /// Human-readable detail.
    pub detail: String,
}

/// HTTP-facing error carrying a status code and an [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// Creates an error with an explicit status, kind, and detail.
    #[must_use]
    pub fn new(status: StatusCode, kind: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                kind,
                detail: detail.into(),
            },
        }
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.body.kind
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.body.kind, self.body.detail)
    }
}

impl std::error::Error for ApiError {}

/// Status code for a service error.
///
/// Validation failures are 422, an empty update is 400, a missing task is
/// 404, a duplicate is 409, and storage failures are 503.
#[must_use]
pub const fn status_for(err: &TaskServiceError) -> StatusCode {
    match err {
        TaskServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TaskServiceError::EmptyUpdate => StatusCode::BAD_REQUEST,
        TaskServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        TaskServiceError::DuplicateKey(_) => StatusCode::CONFLICT,
        TaskServiceError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        Self::new(status_for(&err), err.kind(), err.to_string())
    }
}

impl From<TaskValidationError> for ApiError {
    fn from(err: TaskValidationError) -> Self {
        TaskServiceError::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "invalid_body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), "invalid_query", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                kind = self.body.kind,
                detail = %self.body.detail,
                "request failed"
            );
        } else {
            tracing::debug!(
                status = %self.status,
                kind = self.body.kind,
                detail = %self.body.detail,
                "request rejected"
            );
        }
        (self.status, Json(self.body)).into_response()
    }
}
