pub mod models;
pub mod pii;

pub use models::{Booking, BookingStatus, Bus, BusId};
pub use pii::Masked;
