use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorBody;

/// Top-level application error.
/// Validation variants are safe to show to the caller; upstream variants carry
/// internal detail that is only ever logged.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' is required")]
    MissingField { field_name: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    // ── Completion provider errors ───────────────────────────────────────────
    #[error("Completion provider unavailable at {host}")]
    ProviderUnavailable { host: String },

    #[error("Completion failed: {message}")]
    UpstreamFailed { message: String },
}

impl AppError {
    pub fn empty_field(field_name: impl Into<String>) -> Self {
        AppError::EmptyField { field_name: field_name.into() }
    }

    pub fn missing_field(field_name: impl Into<String>) -> Self {
        AppError::MissingField { field_name: field_name.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyField { .. } | AppError::MissingField { .. } | AppError::InvalidBody { .. }
        )
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::ProviderUnavailable { .. } | AppError::UpstreamFailed { .. })
    }

    /// Converts the error into an HTTP response. Anything that is not a
    /// validation error is reported with `public_message` only.
    pub fn into_response_with(self, public_message: &str) -> Response {
        if self.is_validation() {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::new(self.to_string()))).into_response();
        }
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(public_message))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with("Internal server error")
    }
}
