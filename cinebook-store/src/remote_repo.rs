use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{error, info};
use cinebook_catalog::Showtime;
use cinebook_core::{
    BookingBackend, BookingConfirmation, BookingError, BookingId, BookingRecord, BookingResult,
};
use cinebook_shared::{
    BookSeatRequest, BookSeatResponse, DeleteBookingRequest, DeleteBookingResponse, MaskedName,
};

use crate::app_config::RemoteConfig;

/// Proxies bookings to a remote booking service over HTTP.
///
/// Holds no seat state; the service is the only source of truth. A request
/// that fails in transit is reported as `TransportFailure` and not retried.
#[derive(Clone)]
pub struct RemoteBookingBackend {
    client: Client,
    base_url: String,
}

impl RemoteBookingBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &RemoteConfig) -> Self {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads the JSON body whatever the HTTP status; error statuses still
    /// carry a `{status, message}` body.
    async fn read_body<T: DeserializeOwned>(
        &self,
        response: Result<reqwest::Response, reqwest::Error>,
        what: &str,
    ) -> BookingResult<T> {
        let response = response.map_err(|e| transport_failure(what, e))?;
        let status = response.status();
        response.json::<T>().await.map_err(|e| {
            error!("{} returned unreadable body (HTTP {}): {}", what, status, e);
            BookingError::TransportFailure(format!("HTTP {}: {}", status, e))
        })
    }
}

fn transport_failure(what: &str, e: reqwest::Error) -> BookingError {
    error!("{} failed: {}", what, e);
    BookingError::TransportFailure(e.to_string())
}

#[async_trait]
impl BookingBackend for RemoteBookingBackend {
    async fn book_seat(
        &self,
        showtime: &str,
        seat: &str,
        name: &str,
    ) -> BookingResult<BookingConfirmation> {
        let request = BookSeatRequest {
            showtime: showtime.to_string(),
            seat: seat.to_string(),
            name: name.to_string(),
        };

        let response = self
            .client
            .post(self.url("/book-seat"))
            .json(&request)
            .send()
            .await;
        let body: BookSeatResponse = self.read_body(response, "book-seat").await?;

        let result = body.into_result();
        if let Ok(confirmation) = &result {
            info!(
                "Remote booking #{} confirmed: {} {} for {}",
                confirmation.booking_id, showtime, seat, MaskedName(name)
            );
        }
        result
    }

    async fn delete_booking(&self, index: usize) -> BookingResult<BookingRecord> {
        let response = self
            .client
            .post(self.url("/delete-booking"))
            .json(&DeleteBookingRequest { index })
            .send()
            .await;
        let body: DeleteBookingResponse = self.read_body(response, "delete-booking").await?;
        body.into_result()
    }

    async fn delete_booking_by_id(&self, id: BookingId) -> BookingResult<BookingRecord> {
        let response = self
            .client
            .delete(self.url(&format!("/bookings/{}", id)))
            .send()
            .await;
        let body: DeleteBookingResponse = self.read_body(response, "delete booking by id").await?;
        body.into_result()
    }

    async fn list_showtimes(&self) -> BookingResult<Vec<Showtime>> {
        let response = self.client.get(self.url("/showtimes")).send().await;
        self.read_body(response, "showtimes").await
    }

    async fn list_history(&self) -> BookingResult<Vec<BookingRecord>> {
        let response = self.client.get(self.url("/history")).send().await;
        self.read_body(response, "history").await
    }
}
