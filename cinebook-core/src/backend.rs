use async_trait::async_trait;
use cinebook_catalog::Showtime;

use crate::booking::{BookingConfirmation, BookingId, BookingRecord};
use crate::BookingResult;

/// Where bookings are applied: an in-process store or a remote service.
///
/// Callers treat both the same way and re-read `list_showtimes`/`list_history`
/// after a mutation to refresh their view.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn book_seat(
        &self,
        showtime: &str,
        seat: &str,
        name: &str,
    ) -> BookingResult<BookingConfirmation>;

    async fn delete_booking(&self, index: usize) -> BookingResult<BookingRecord>;

    async fn delete_booking_by_id(&self, id: BookingId) -> BookingResult<BookingRecord>;

    async fn list_showtimes(&self) -> BookingResult<Vec<Showtime>>;

    async fn list_history(&self) -> BookingResult<Vec<BookingRecord>>;
}
