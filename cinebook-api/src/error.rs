use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use cinebook_core::BookingError;

#[derive(Debug)]
pub enum AppError {
    Booking(BookingError),
    /// Body the JSON extractor refused; carries its status and text.
    InvalidRequest(StatusCode, String),
    QueueUnavailable,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Booking(err) => match err {
                BookingError::MissingName
                | BookingError::UnknownShowtime(_)
                | BookingError::UnknownSeat(_) => StatusCode::BAD_REQUEST,
                BookingError::IndexOutOfRange { .. } | BookingError::UnknownBooking(_) => {
                    StatusCode::NOT_FOUND
                }
                BookingError::SeatUnavailable { .. } | BookingError::SoldOut(_) => {
                    StatusCode::CONFLICT
                }
                BookingError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
                BookingError::TransportFailure(_) => StatusCode::BAD_GATEWAY,
            },
            AppError::InvalidRequest(status, _) => *status,
            AppError::QueueUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Booking(err) => json!({
                "status": "error",
                "message": err.to_string(),
                "error": err,
            }),
            AppError::InvalidRequest(_, message) => json!({
                "status": "error",
                "message": message,
            }),
            AppError::QueueUnavailable => {
                tracing::error!("Booking queue is not accepting requests");
                json!({
                    "status": "error",
                    "message": "Booking service is shutting down.",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::Booking(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.status(), rejection.body_text())
    }
}
