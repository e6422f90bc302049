use async_trait::async_trait;
use busline_shared::{Booking, Bus, BusId};
use uuid::Uuid;

use crate::{BookingRequest, BookingStats, BusQuery, CancelOutcome, CoreResult, RouteSearch};

/// Seat-level access to buses, as needed by the booking ledger.
///
/// Bookings hold a `BusId` rather than the bus itself, so the ledger resolves
/// buses through this trait and must cope with a bus that no longer resolves.
pub trait SeatInventory {
    fn bus(&self, id: BusId) -> Option<&Bus>;

    /// Take `seats` seats from the bus in one step. Fails with `NotFound` for an
    /// unknown bus and `Capacity` when fewer than `seats` are available, leaving
    /// availability untouched. Returns the bus after the decrement.
    fn reserve(&mut self, id: BusId, seats: u32) -> CoreResult<Bus>;

    /// Give `seats` seats back. `None` means the bus cannot be resolved and the
    /// caller should treat the seats as already reconciled.
    fn release(&mut self, id: BusId, seats: u32) -> Option<u32>;
}

/// Store-level operations consumed by the HTTP layer
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn list_buses(&self, query: &BusQuery) -> Vec<Bus>;

    async fn get_bus(&self, id: BusId) -> CoreResult<Bus>;

    async fn search_route(&self, route: &RouteSearch) -> Vec<Bus>;

    async fn book(&self, request: BookingRequest) -> CoreResult<Booking>;

    async fn list_bookings(&self, email_filter: Option<&str>) -> Vec<Booking>;

    async fn get_booking(&self, id: Uuid) -> CoreResult<Booking>;

    async fn cancel_booking(&self, id: Uuid) -> CoreResult<CancelOutcome>;

    async fn stats(&self) -> BookingStats;
}
