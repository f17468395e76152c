use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Not enough seats available")]
    CapacityExceeded,

    #[error("Payment not confirmed")]
    PaymentNotConfirmed,

    #[error("Payment already confirmed")]
    PaymentAlreadyConfirmed,

    #[error("Payment processor error: {0}")]
    UpstreamError(String),

    #[error("{0}")]
    PersistenceError(String),

    #[error("Failed to create RSVP")]
    RsvpCreationError(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CapacityExceeded => StatusCode::CONFLICT,
            AppError::PaymentNotConfirmed => StatusCode::PAYMENT_REQUIRED,
            AppError::PaymentAlreadyConfirmed => StatusCode::CONFLICT,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RsvpCreationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::RsvpCreationError(detail) => {
                error!(error = ?self, detail = %detail, "Application error");
            }
            other => {
                error!(error = ?other, "Application error");
            }
        }
    }
}

/// Wire shape for every error response: `{ "error": "<message>" }`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        // Do not expose internal details in the API response
        let public_message = match &self {
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: public_message })).into_response()
    }
}
