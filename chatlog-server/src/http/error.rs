//! API error types with IntoResponse
//!
//! Only request-shape problems become errors. Store failures are folded into
//! the `code: 0` envelope by the handlers and never reach this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::envelope::Envelope;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Field validation failed (400)
    Validation(ValidationError),

    /// Body could not be read as the expected JSON (400)
    Rejected { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::Rejected { message } => message,
        };

        tracing::debug!(status = status.as_u16(), %message, "request rejected");
        (status, Json(Envelope::rejected(message))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
