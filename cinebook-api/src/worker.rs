use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use cinebook_catalog::{SeatId, ShowtimeId};
use cinebook_core::{BookingBackend, BookingConfirmation, BookingResult};
use cinebook_shared::{BookSeatRequest, BookingEvent};

struct BookingJob {
    request: BookSeatRequest,
    reply: oneshot::Sender<BookingResult<BookingConfirmation>>,
}

/// The worker has stopped and can no longer take requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueClosed;

/// FIFO queue in front of the booking backend. A single worker applies
/// bookings strictly in arrival order.
#[derive(Clone)]
pub struct BookingQueue {
    tx: mpsc::Sender<BookingJob>,
}

impl BookingQueue {
    pub fn start(
        backend: Arc<dyn BookingBackend>,
        events_tx: broadcast::Sender<BookingEvent>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(process_booking_queue(rx, backend, events_tx));
        (Self { tx }, handle)
    }

    /// Enqueues a booking and waits for the worker's answer.
    pub async fn submit(
        &self,
        request: BookSeatRequest,
    ) -> Result<BookingResult<BookingConfirmation>, QueueClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(BookingJob { request, reply })
            .await
            .map_err(|_| QueueClosed)?;
        rx.await.map_err(|_| QueueClosed)
    }
}

async fn process_booking_queue(
    mut rx: mpsc::Receiver<BookingJob>,
    backend: Arc<dyn BookingBackend>,
    events_tx: broadcast::Sender<BookingEvent>,
) {
    info!("Booking queue worker started");

    while let Some(BookingJob { request, reply }) = rx.recv().await {
        let result = backend
            .book_seat(&request.showtime, &request.seat, &request.name)
            .await;

        if let Ok(confirmation) = &result {
            // Both parse: the backend just accepted them.
            if let (Ok(showtime), Ok(seat)) =
                (ShowtimeId::new(request.showtime.clone()), request.seat.parse::<SeatId>())
            {
                // No subscribers is fine.
                let _ = events_tx.send(BookingEvent::booked(confirmation.booking_id, showtime, seat));
            }
        }

        if reply.send(result).is_err() {
            debug!("Booking caller went away before the reply");
        }
    }

    info!("Booking queue worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinebook_catalog::{default_catalog, SEAT_COUNT};
    use cinebook_core::BookingError;
    use cinebook_store::LocalBookingBackend;

    fn request(seat: &str, name: &str) -> BookSeatRequest {
        BookSeatRequest {
            showtime: "Showtime 1".to_string(),
            seat: seat.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_queue_applies_in_order() {
        let backend: Arc<dyn BookingBackend> =
            Arc::new(LocalBookingBackend::from_catalog(&default_catalog(), SEAT_COUNT).unwrap());
        let (events_tx, mut events_rx) = broadcast::channel(16);
        let (queue, _worker) = BookingQueue::start(backend.clone(), events_tx, 4);

        let first = queue.submit(request("A1", "Alice")).await.unwrap();
        let second = queue.submit(request("A1", "Bob")).await.unwrap();
        assert!(first.is_ok());
        assert!(matches!(second, Err(BookingError::SeatUnavailable { .. })));

        let history = backend.list_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].name, "Alice");

        // Only the successful booking is announced.
        let event = events_rx.recv().await.unwrap();
        assert_eq!(event.name(), "seat_booked");
        assert!(events_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_queue() {
        let backend: Arc<dyn BookingBackend> =
            Arc::new(LocalBookingBackend::from_catalog(&default_catalog(), SEAT_COUNT).unwrap());
        let (events_tx, _) = broadcast::channel(16);
        let (queue, worker) = BookingQueue::start(backend, events_tx, 4);

        worker.abort();
        let _ = worker.await;
        assert_eq!(queue.submit(request("A1", "Alice")).await, Err(QueueClosed));
    }
}
