use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use cinebook_catalog::{build_showtimes, CatalogError, Showtime, ShowtimeConfig};
use cinebook_core::{
    BookingBackend, BookingConfirmation, BookingId, BookingRecord, BookingResult, BookingStore,
};
use cinebook_shared::MaskedName;

/// In-process backend: one `BookingStore` shared by every handle.
#[derive(Clone)]
pub struct LocalBookingBackend {
    store: Arc<Mutex<BookingStore>>,
}

impl LocalBookingBackend {
    pub fn new(store: BookingStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn from_catalog(
        entries: &[ShowtimeConfig],
        max_tickets: usize,
    ) -> Result<Self, CatalogError> {
        let showtimes = build_showtimes(entries, max_tickets)?;
        info!("Booking store initialized with {} showtimes", showtimes.len());
        Ok(Self::new(BookingStore::new(showtimes)))
    }
}

#[async_trait]
impl BookingBackend for LocalBookingBackend {
    async fn book_seat(
        &self,
        showtime: &str,
        seat: &str,
        name: &str,
    ) -> BookingResult<BookingConfirmation> {
        let result = self.store.lock().await.book_seat(showtime, seat, name);
        match &result {
            Ok(confirmation) => info!(
                "Booking #{} confirmed: {} {} for {}",
                confirmation.booking_id, showtime, seat, MaskedName(name)
            ),
            Err(e) => warn!("Booking {} {} refused: {}", showtime, seat, e),
        }
        result
    }

    async fn delete_booking(&self, index: usize) -> BookingResult<BookingRecord> {
        let result = self.store.lock().await.delete_booking(index);
        match &result {
            Ok(record) => info!("Booking #{} at position {} deleted", record.id, index),
            Err(e) => warn!("Delete at position {} refused: {}", index, e),
        }
        result
    }

    async fn delete_booking_by_id(&self, id: BookingId) -> BookingResult<BookingRecord> {
        let result = self.store.lock().await.delete_booking_by_id(id);
        match &result {
            Ok(record) => info!("Booking #{} deleted", record.id),
            Err(e) => warn!("Delete of #{} refused: {}", id, e),
        }
        result
    }

    async fn list_showtimes(&self) -> BookingResult<Vec<Showtime>> {
        Ok(self.store.lock().await.list_showtimes())
    }

    async fn list_history(&self) -> BookingResult<Vec<BookingRecord>> {
        Ok(self.store.lock().await.list_history())
    }
}
