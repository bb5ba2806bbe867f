use std::sync::Arc;
use tokio::sync::broadcast;
use cinebook_core::BookingBackend;
use cinebook_shared::BookingEvent;
use cinebook_store::app_config::BookingConfig;

use crate::worker::BookingQueue;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BookingBackend>,
    pub queue: BookingQueue,
    pub events_tx: broadcast::Sender<BookingEvent>,
}

impl AppState {
    /// Wires a backend to a fresh event channel and spawns the booking queue
    /// worker. Must run inside a tokio runtime.
    pub fn new(backend: Arc<dyn BookingBackend>, config: &BookingConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.event_buffer.max(1));
        let (queue, _worker) =
            BookingQueue::start(backend.clone(), events_tx.clone(), config.queue_capacity);

        Self {
            backend,
            queue,
            events_tx,
        }
    }
}
