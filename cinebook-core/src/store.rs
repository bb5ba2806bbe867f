use chrono::Utc;
use tracing::debug;
use cinebook_catalog::{SeatId, Showtime};

use crate::booking::{BookingConfirmation, BookingId, BookingRecord};
use crate::{BookingError, BookingResult};

/// Owns the showtime catalog, seat availability and booking history of one
/// session.
///
/// Every booked seat is referenced by exactly one record in `history`, and each
/// showtime's `sold_tickets` equals its number of records.
#[derive(Debug, Clone)]
pub struct BookingStore {
    showtimes: Vec<Showtime>,
    history: Vec<BookingRecord>,
    next_id: u64,
}

impl BookingStore {
    /// Showtime ids are expected to be unique; `cinebook_catalog::build_showtimes`
    /// guarantees it.
    pub fn new(showtimes: Vec<Showtime>) -> Self {
        Self {
            showtimes,
            history: Vec::new(),
            next_id: 1,
        }
    }

    pub fn book_seat(
        &mut self,
        showtime_id: &str,
        seat_id: &str,
        customer_name: &str,
    ) -> BookingResult<BookingConfirmation> {
        let name = customer_name.trim();
        if name.is_empty() {
            return Err(BookingError::MissingName);
        }

        let showtime = self
            .showtimes
            .iter_mut()
            .find(|s| s.id.as_str() == showtime_id)
            .ok_or_else(|| BookingError::UnknownShowtime(showtime_id.to_string()))?;

        let seat: SeatId = seat_id
            .parse()
            .map_err(|_| BookingError::UnknownSeat(seat_id.to_string()))?;

        if !showtime.seats.is_available(seat) {
            return Err(BookingError::SeatUnavailable {
                showtime: showtime.id.clone(),
                seat,
            });
        }

        // Only reachable when the ceiling is below the seat count.
        if showtime.is_sold_out() {
            return Err(BookingError::SoldOut(showtime.id.to_string()));
        }

        showtime.seats.set_available(seat, false);
        showtime.sold_tickets += 1;

        let record = BookingRecord {
            id: BookingId(self.next_id),
            showtime: showtime.id.clone(),
            seat,
            name: name.to_string(),
            movie: showtime.movie.clone(),
            purchased_at: Utc::now(),
        };
        self.next_id += 1;

        debug!("Seat {} on {} booked as #{}", seat, showtime.id, record.id);
        let confirmation = BookingConfirmation::for_record(&record);
        self.history.push(record);

        Ok(confirmation)
    }

    /// Removes the record at `index`. Records after it shift down by one, so
    /// indices held from before the call are stale.
    pub fn delete_booking(&mut self, index: usize) -> BookingResult<BookingRecord> {
        if index >= self.history.len() {
            return Err(BookingError::IndexOutOfRange {
                index,
                len: self.history.len(),
            });
        }

        let record = self.history.remove(index);
        self.release(&record);
        Ok(record)
    }

    pub fn delete_booking_by_id(&mut self, id: BookingId) -> BookingResult<BookingRecord> {
        let index = self
            .history
            .iter()
            .position(|record| record.id == id)
            .ok_or(BookingError::UnknownBooking(id.0))?;

        let record = self.history.remove(index);
        self.release(&record);
        Ok(record)
    }

    fn release(&mut self, record: &BookingRecord) {
        if let Some(showtime) = self.showtimes.iter_mut().find(|s| s.id == record.showtime) {
            showtime.seats.set_available(record.seat, true);
            showtime.sold_tickets = showtime.sold_tickets.saturating_sub(1);
            debug!("Seat {} on {} released from #{}", record.seat, showtime.id, record.id);
        }
    }

    pub fn list_showtimes(&self) -> Vec<Showtime> {
        self.showtimes.clone()
    }

    pub fn list_history(&self) -> Vec<BookingRecord> {
        self.history.clone()
    }

    pub fn showtime(&self, id: &str) -> Option<&Showtime> {
        self.showtimes.iter().find(|s| s.id.as_str() == id)
    }

    /// `None` when either the showtime or the seat does not exist.
    pub fn is_available(&self, showtime_id: &str, seat_id: &str) -> Option<bool> {
        let seat: SeatId = seat_id.parse().ok()?;
        self.showtime(showtime_id).map(|s| s.seats.is_available(seat))
    }
}
