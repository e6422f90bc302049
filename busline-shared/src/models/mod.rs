pub mod booking;
pub mod bus;

pub use booking::{Booking, BookingStatus};
pub use bus::{Bus, BusId};
