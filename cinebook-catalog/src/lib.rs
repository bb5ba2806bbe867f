pub mod seat;
pub mod showtime;

pub use seat::{SeatId, SeatMap, ROWS, SEATS_PER_ROW, SEAT_COUNT};
pub use showtime::{build_showtimes, default_catalog, Showtime, ShowtimeConfig, ShowtimeId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid seat: {0}")]
    InvalidSeat(String),

    #[error("Invalid showtime label: {0:?}")]
    InvalidShowtime(String),

    #[error("Duplicate showtime in catalog: {0}")]
    DuplicateShowtime(String),
}
