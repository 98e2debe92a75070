//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::dto::submission::ErrorBody;
use relay_engine::EngineError;

use crate::service::submission_service::SubmissionError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// The pipeline document could not be decoded
    InvalidInput(String),
    /// The request body could not be read (too large, aborted)
    BodyRejected(BytesRejection),
    NotFound(String),
    /// The event bus did not take the submission
    DispatchUnavailable(String),
    /// The workflow engine failed or could not be reached
    EngineError(EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::InvalidInput(details) => (
                StatusCode::BAD_REQUEST,
                "Invalid pipeline document".to_string(),
                Some(details),
            ),
            ApiError::BodyRejected(rejection) => {
                (rejection.status(), rejection.body_text(), None)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::DispatchUnavailable(details) => {
                tracing::error!("Failed to publish submission: {}", details);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Pipeline dispatch unavailable".to_string(),
                    Some(details),
                )
            }
            ApiError::EngineError(err) => {
                tracing::error!("Workflow engine error: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Workflow engine error".to_string(),
                    Some(err.to_string()),
                )
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            SubmissionError::DispatchUnavailable(msg) => ApiError::DispatchUnavailable(msg),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::BodyRejected(rejection)
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(id) => ApiError::NotFound(format!("Pipeline {} not found", id)),
            other => ApiError::EngineError(other),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
