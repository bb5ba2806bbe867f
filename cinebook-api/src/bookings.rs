use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    routing::{delete, post},
    Router,
};
use tracing::info;
use cinebook_core::BookingId;
use cinebook_shared::{
    BookSeatRequest, BookSeatResponse, BookingEvent, DeleteBookingRequest, DeleteBookingResponse,
    MaskedName,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book-seat", post(book_seat))
        .route("/delete-booking", post(delete_booking))
        .route("/bookings/{id}", delete(delete_booking_by_id))
}

/// POST /book-seat
/// Queues the booking and answers once the worker has applied it.
async fn book_seat(
    State(state): State<AppState>,
    payload: Result<Json<BookSeatRequest>, JsonRejection>,
) -> Result<Json<BookSeatResponse>, AppError> {
    let Json(req) = payload?;
    info!("Booking request: {} {} for {}", req.showtime, req.seat, MaskedName(&req.name));

    let confirmation = state
        .queue
        .submit(req)
        .await
        .map_err(|_| AppError::QueueUnavailable)??;

    Ok(Json(BookSeatResponse::success(confirmation)))
}

/// POST /delete-booking
/// Deletes by zero-based history position; later positions shift down.
async fn delete_booking(
    State(state): State<AppState>,
    payload: Result<Json<DeleteBookingRequest>, JsonRejection>,
) -> Result<Json<DeleteBookingResponse>, AppError> {
    let Json(req) = payload?;
    let record = state.backend.delete_booking(req.index).await?;
    let _ = state.events_tx.send(BookingEvent::deleted(&record));
    Ok(Json(DeleteBookingResponse::success(record)))
}

/// DELETE /bookings/{id}
async fn delete_booking_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteBookingResponse>, AppError> {
    let record = state.backend.delete_booking_by_id(BookingId(id)).await?;
    let _ = state.events_tx.send(BookingEvent::deleted(&record));
    Ok(Json(DeleteBookingResponse::success(record)))
}
