pub mod booking;
pub mod repository;
pub mod search;
pub mod validation;

use busline_shared::BusId;

pub use booking::{BookingRequest, BookingStats, CancelOutcome};
pub use repository::{ReservationRepository, SeatInventory};
pub use search::{BusQuery, RouteSearch, SortKey};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Not enough seats available: requested {requested}, only {available} left")]
    Capacity { requested: u32, available: u32 },
}

impl CoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn bus_not_found(id: BusId) -> Self {
        Self::NotFound {
            entity: "Bus",
            id: id.to_string(),
        }
    }

    pub fn booking_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Booking",
            id: id.to_string(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
