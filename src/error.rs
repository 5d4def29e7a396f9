use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Endpoint-facing error surface. Everything that can terminate a request
/// before streaming starts lands here; errors observed mid-stream never
/// reach this type (they're emitted as `event: error` frames instead, see
/// `net::sse`).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("active connection count at capacity")]
    CapacityExceeded,

    #[error("invalid token")]
    InvalidToken,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("relational store error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache store error: {0}")]
    Cache(#[from] redis::RedisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::CapacityExceeded => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Database(_) | AppError::Cache(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
