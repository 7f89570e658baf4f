//! Typed errors and HTTP mapping to the failure envelope.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("missing setting: {0}")]
    Missing(&'static str),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// A path segment that cannot be read as a string is a route miss.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}

/// Failure envelope. `error` repeats the numeric status code.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl ErrorBody {
    pub fn new(status: StatusCode) -> Self {
        let message = match status {
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
            _ => "internal server error",
        };
        ErrorBody {
            success: false,
            error: status.as_u16(),
            message,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(ErrorBody::new(status))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_status_codes() {
        assert_eq!(AppError::NotFound("question 3".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Validation("difficulty".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("body".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ErrorBody::new(StatusCode::NOT_FOUND)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": 404, "message": "resource not found"})
        );
    }
}
