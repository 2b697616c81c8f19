use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::report::blocks::BlockId;

/// Errors raised while measuring or packing blocks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("Failed to measure block {block}: {reason}")]
    Measurement { block: BlockId, reason: String },
}

/// Errors raised while assembling blocks from an analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// Only raised for techniques that are exported with ratings shown.
    #[error("Technique '{technique}' has rating {rating}, expected 1-5")]
    InvalidRating { technique: String, rating: u8 },

    #[error("Technique {0} appears more than once in the analysis")]
    DuplicateTechnique(Uuid),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Report(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                e.to_string(),
            ),
            AppError::Layout(LayoutError::InvalidGeometry(msg)) => (
                StatusCode::BAD_REQUEST,
                "INVALID_GEOMETRY",
                msg.clone(),
            ),
            AppError::Layout(e @ LayoutError::Measurement { .. }) => {
                tracing::error!("Pagination aborted: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DOCUMENT_GENERATION_FAILED",
                    "Failed to generate document".to_string(),
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
