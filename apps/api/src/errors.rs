use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure surfaces as a real HTTP status with a
/// `{"status":"error","message"}` body; one convention for all routes.
/// The exception is ranking extraction failure, which is data rather than a
/// fault and rides inside a success body (see `pipeline::extract`).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Catalog format error: {0}")]
    CatalogFormat(String),

    #[error("Model gateway error: {0}")]
    Gateway(#[from] LlmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::CatalogFormat(msg) => {
                tracing::error!("Catalog format error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Invalid catalog data: {msg}"),
                )
            }
            AppError::Gateway(e) => {
                tracing::error!("Model gateway error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Model request failed: {e}"),
                )
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A filesystem error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message
        }));

        (status, body).into_response()
    }
}
