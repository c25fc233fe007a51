//! Request-level error taxonomy.
//!
//! Every failure is caught at the handler boundary and converted into a JSON
//! error envelope; nothing crashes the process. Internal faults are logged
//! but never surfaced with detail to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Fakturownia API key not configured")]
    ProviderNotConfigured,

    /// The provider rejected or failed the call; its payload is relayed
    /// verbatim under `details`.
    #[error("Failed to send to Fakturownia")]
    Provider { details: serde_json::Value },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "error": message }))
            }
            ApiError::ProviderNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Fakturownia API key not configured" }),
            ),
            ApiError::Provider { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to send to Fakturownia", "details": details }),
            ),
            ApiError::Internal(source) => {
                error!("Internal error: {source:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
