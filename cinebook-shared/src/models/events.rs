use chrono::{DateTime, Utc};
use cinebook_catalog::{SeatId, ShowtimeId};
use cinebook_core::{BookingId, BookingRecord};

/// Change notification pushed to `/events` subscribers. Carries no customer data.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookingEvent {
    SeatBooked {
        booking_id: BookingId,
        showtime: ShowtimeId,
        seat: SeatId,
        at: DateTime<Utc>,
    },
    BookingDeleted {
        booking_id: BookingId,
        showtime: ShowtimeId,
        seat: SeatId,
        at: DateTime<Utc>,
    },
}

impl BookingEvent {
    pub fn booked(booking_id: BookingId, showtime: ShowtimeId, seat: SeatId) -> Self {
        BookingEvent::SeatBooked {
            booking_id,
            showtime,
            seat,
            at: Utc::now(),
        }
    }

    pub fn deleted(record: &BookingRecord) -> Self {
        BookingEvent::BookingDeleted {
            booking_id: record.id,
            showtime: record.showtime.clone(),
            seat: record.seat,
            at: Utc::now(),
        }
    }

    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            BookingEvent::SeatBooked { .. } => "seat_booked",
            BookingEvent::BookingDeleted { .. } => "booking_deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_tagged() {
        let event = BookingEvent::booked(
            BookingId(7),
            ShowtimeId::new("Showtime 1").unwrap(),
            "C7".parse().unwrap(),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "seat_booked");
        assert_eq!(json["seat"], "C7");
        assert_eq!(json["booking_id"], 7);
        assert_eq!(event.name(), "seat_booked");
    }
}
