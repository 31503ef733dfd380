use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::knowledge_base::bedrock::ConnectionError;
use crate::knowledge_base::QueryError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status, machine code and user-facing message for this error.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                format!("Error processing file: {e}"),
            ),
            AppError::Query(e) => {
                tracing::error!("Query error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "QUERY_ERROR",
                    format!("Error querying the knowledge base: {e}"),
                )
            }
            AppError::Connection(e) => {
                tracing::error!("Connection error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONNECTION_ERROR",
                    format!("Error connecting to the knowledge base: {e}"),
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
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
