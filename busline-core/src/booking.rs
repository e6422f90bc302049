use busline_shared::BusId;
use serde::Serialize;

/// Booking request as received from a caller, before validation.
///
/// `seats` is signed so that negative input reaches validation.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub bus_id: BusId,
    pub passenger_name: String,
    pub email: String,
    pub seats: i64,
    pub payment_method: Option<String>,
}

/// Result of a cancellation that found its booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The booking moved from confirmed to cancelled on this call.
    /// `available` is the bus availability after the credit, or `None` when the
    /// bus is no longer in the catalog.
    Cancelled {
        restored_seats: u32,
        available: Option<u32>,
    },
    /// Already cancelled earlier; nothing was credited.
    AlreadyCancelled,
}

/// Aggregate figures over the current catalog and ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_buses: usize,
    pub total_bookings: usize,
    pub confirmed_bookings: usize,
    /// Sum of `total_price` over confirmed bookings only
    pub total_revenue: f64,
}
