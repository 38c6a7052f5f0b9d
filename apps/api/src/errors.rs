use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::feedback::StorageError;
use crate::resume::PipelineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wrong upload type. Rendered as `{"message": ...}` like the rest of the upload API.
    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFile(msg) => {
                return (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response();
            }
            AppError::Pipeline(PipelineError::DocumentRead(e)) => {
                tracing::warn!("Document read error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_READ_ERROR",
                    e.to_string(),
                )
            }
            AppError::Pipeline(PipelineError::Rasterization(e)) => {
                tracing::error!("Rasterization error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RASTERIZATION_ERROR",
                    "The document could not be rendered".to_string(),
                )
            }
            AppError::Pipeline(PipelineError::Provider(e)) => {
                tracing::error!("Provider error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "The language model request failed".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
