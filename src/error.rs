//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::booking::responses::ErrorResponse;
use crate::booking::BookingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Translator not found: {0}")]
    TranslatorNotFound(String),

    #[error("Booking flow not found: {0}")]
    FlowNotFound(Uuid),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::TranslatorNotFound(_) => "translator_not_found",
            AppError::FlowNotFound(_) => "flow_not_found",
            AppError::Booking(e) => match e {
                BookingError::InvalidDuration(_) => "invalid_duration",
                BookingError::InvalidRate(_) => "invalid_rate",
                BookingError::UnknownTimeSlot(_) => "unknown_time_slot",
                BookingError::UnknownChannel(_) => "unknown_channel",
                BookingError::InvalidDate(_) => "invalid_date",
                BookingError::DateInPast { .. } => "date_in_past",
                BookingError::MissingFields(_) => "missing_fields",
                BookingError::FlowClosed => "flow_closed",
                BookingError::ReservationFailed(_) => "reservation_failed",
            },
            AppError::InvalidBody { .. } => "invalid_body",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::TranslatorNotFound(_) | AppError::FlowNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Booking(BookingError::FlowClosed) => StatusCode::CONFLICT,
            AppError::Booking(BookingError::ReservationFailed(_)) => StatusCode::BAD_GATEWAY,
            AppError::Booking(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let details = match &self {
            AppError::Booking(BookingError::MissingFields(fields)) => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        };

        let message = match &self {
            AppError::Booking(BookingError::ReservationFailed(msg)) => {
                tracing::error!("Reservation failed: {}", msg);
                self.to_string()
            }
            other => {
                tracing::debug!("Request rejected: {}", other);
                other.to_string()
            }
        };

        let body = ErrorResponse {
            error_type: self.error_type().to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
