//! API Error Handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    MethodNotFound(String),
    EntityNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::MethodNotFound(method_id) => serde_json::json!({
                "error": "Method not found",
                "method_id": method_id,
            }),
            ApiError::EntityNotFound(entity_id) => serde_json::json!({
                "error": "Entity not found",
                "entity_id": entity_id,
            }),
        };

        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
