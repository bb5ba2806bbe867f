use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use cinebook_catalog::{SeatId, ShowtimeId};

/// Store-assigned booking number. Increases monotonically and is never reused,
/// unlike the positional index into the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    pub showtime: ShowtimeId,
    pub seat: SeatId,
    pub name: String,
    pub movie: String,
    pub purchased_at: DateTime<Utc>,
}

/// Returned by a successful booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    pub movie: String,
    pub message: String,
}

impl BookingConfirmation {
    pub fn for_record(record: &BookingRecord) -> Self {
        Self {
            booking_id: record.id,
            movie: record.movie.clone(),
            message: format!(
                "Seat {} for {} successfully booked by {}!",
                record.seat, record.movie, record.name
            ),
        }
    }
}
