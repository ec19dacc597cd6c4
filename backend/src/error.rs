//! Error handling for the Weather Outlook Service
//!
//! Every failure surfaced over HTTP is reduced to a single-key JSON body so
//! clients can treat all errors uniformly.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    InvalidInput(String),

    // Upstream provider errors; the message is the provider's own text
    #[error("{0}")]
    Upstream(String),

    // Rain outlook pipeline errors; the context builder swallows these and
    // degrades the outlook instead of failing the request
    #[error("Historical dataset unavailable: {0}")]
    DataUnavailable(String),

    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    // Internal errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    Unexpected(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::DataUnavailable(_) | AppError::InsufficientData(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Weather history is temporarily unavailable".to_string(),
            ),
            AppError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Unexpected(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let response = AppError::InvalidInput("Missing coordinates".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_maps_to_bad_gateway() {
        let response = AppError::Upstream("city not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn pipeline_errors_map_to_service_unavailable() {
        let response = AppError::DataUnavailable("no csv".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn upstream_message_is_preserved_verbatim() {
        let error = AppError::Upstream("city not found".to_string());
        assert_eq!(error.to_string(), "city not found");
    }
}
