use serde::{Deserialize, Serialize};
use cinebook_core::{BookingConfirmation, BookingError, BookingId, BookingRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
    #[serde(other)]
    Other,
}

/// Body of `POST /book-seat`. Absent fields deserialize as empty strings so
/// they fail validation instead of the JSON extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSeatRequest {
    #[serde(default)]
    pub showtime: String,
    #[serde(default)]
    pub seat: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSeatResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<BookingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<BookingError>,
}

impl BookSeatResponse {
    pub fn success(confirmation: BookingConfirmation) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: confirmation.message,
            movie: Some(confirmation.movie),
            booking_id: Some(confirmation.booking_id),
            error: None,
        }
    }

    pub fn into_result(self) -> Result<BookingConfirmation, BookingError> {
        match (self.status, self.movie, self.booking_id) {
            (ResponseStatus::Success, Some(movie), Some(booking_id)) => Ok(BookingConfirmation {
                booking_id,
                movie,
                message: self.message,
            }),
            (ResponseStatus::Success, _, _) => Err(BookingError::TransportFailure(
                "success response without booking details".to_string(),
            )),
            _ => Err(self.error.unwrap_or(BookingError::Rejected(self.message))),
        }
    }
}

/// Body of `POST /delete-booking`; `index` is the zero-based history position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookingRequest {
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookingResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<BookingError>,
}

impl DeleteBookingResponse {
    pub fn success(record: BookingRecord) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: "Booking successfully deleted.".to_string(),
            booking: Some(record),
            error: None,
        }
    }

    pub fn into_result(self) -> Result<BookingRecord, BookingError> {
        match (self.status, self.booking) {
            (ResponseStatus::Success, Some(record)) => Ok(record),
            (ResponseStatus::Success, None) => Err(BookingError::TransportFailure(
                "success response without the deleted booking".to_string(),
            )),
            _ => Err(self.error.unwrap_or(BookingError::Rejected(self.message))),
        }
    }
}
