pub mod models;
pub mod pii;

pub use models::events::BookingEvent;
pub use models::wire::{
    BookSeatRequest, BookSeatResponse, DeleteBookingRequest, DeleteBookingResponse, ResponseStatus,
};
pub use pii::MaskedName;
