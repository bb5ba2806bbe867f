use axum::{
    extract::{Json, State},
    routing::get,
    Router,
};
use cinebook_catalog::Showtime;
use cinebook_core::BookingRecord;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/showtimes", get(list_showtimes))
        .route("/history", get(list_history))
}

async fn list_showtimes(State(state): State<AppState>) -> Result<Json<Vec<Showtime>>, AppError> {
    Ok(Json(state.backend.list_showtimes().await?))
}

async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<BookingRecord>>, AppError> {
    Ok(Json(state.backend.list_history().await?))
}
