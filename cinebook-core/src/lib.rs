pub mod backend;
pub mod booking;
pub mod store;

pub use backend::BookingBackend;
pub use booking::{BookingConfirmation, BookingId, BookingRecord};
pub use store::BookingStore;

use serde::{Deserialize, Serialize};
use cinebook_catalog::{SeatId, ShowtimeId};

/// Why a booking operation did not apply. None of these leave partial state
/// behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum BookingError {
    #[error("Name is required to book a seat.")]
    MissingName,
    #[error("Unknown showtime: {0}")]
    UnknownShowtime(String),
    #[error("Unknown seat: {0}")]
    UnknownSeat(String),
    #[error("Seat {seat} for {showtime} is already booked.")]
    SeatUnavailable { showtime: ShowtimeId, seat: SeatId },
    #[error("Maximum number of tickets sold for {0}.")]
    SoldOut(String),
    #[error("Invalid booking index {index}: history has {len} entries.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Booking {0} not found.")]
    UnknownBooking(u64),
    #[error("Booking backend unreachable: {0}")]
    TransportFailure(String),
    #[error("Booking rejected: {0}")]
    Rejected(String),
}

impl BookingError {
    /// Matches the `kind` tag used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::MissingName => "missing_name",
            BookingError::UnknownShowtime(_) => "unknown_showtime",
            BookingError::UnknownSeat(_) => "unknown_seat",
            BookingError::SeatUnavailable { .. } => "seat_unavailable",
            BookingError::SoldOut(_) => "sold_out",
            BookingError::IndexOutOfRange { .. } => "index_out_of_range",
            BookingError::UnknownBooking(_) => "unknown_booking",
            BookingError::TransportFailure(_) => "transport_failure",
            BookingError::Rejected(_) => "rejected",
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
