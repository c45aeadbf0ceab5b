//! API error types and error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use newsroom_core::CoreError;
use newsroom_storage::StorageError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(messages) => ApiError::Validation(messages),
            CoreError::Serialization(e) => ApiError::Decode(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    errors: Vec<String>,
}

/// Validation failures become a JSON list with 400.
/// Everything else is reported as its raw text with 500.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { errors })).into_response()
            }
            other => {
                tracing::error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
            }
        }
    }
}
