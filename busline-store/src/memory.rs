use async_trait::async_trait;
use busline_catalog::Catalog;
use busline_core::{
    BookingRequest, BookingStats, BusQuery, CancelOutcome, CoreResult, ReservationRepository,
    RouteSearch,
};
use busline_ledger::BookingLedger;
use busline_shared::{Booking, Bus, BusId};
use tokio::sync::RwLock;
use uuid::Uuid;

struct Reservations {
    catalog: Catalog,
    ledger: BookingLedger,
}

/// Process-lifetime store for the catalog and the booking ledger.
///
/// Both live under one lock. `book` and `cancel_booking` hold the write lock
/// for their whole check-then-mutate sequence, so concurrent requests against
/// the same bus are serialized and can never oversell.
pub struct MemoryStore {
    inner: RwLock<Reservations>,
}

impl MemoryStore {
    pub fn new(catalog: Catalog, ledger: BookingLedger) -> Self {
        Self {
            inner: RwLock::new(Reservations { catalog, ledger }),
        }
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn list_buses(&self, query: &BusQuery) -> Vec<Bus> {
        self.inner.read().await.catalog.list(query)
    }

    async fn get_bus(&self, id: BusId) -> CoreResult<Bus> {
        self.inner.read().await.catalog.get(id).cloned()
    }

    async fn search_route(&self, route: &RouteSearch) -> Vec<Bus> {
        self.inner.read().await.catalog.between(route)
    }

    async fn book(&self, request: BookingRequest) -> CoreResult<Booking> {
        let mut guard = self.inner.write().await;
        let Reservations { catalog, ledger } = &mut *guard;
        ledger.book(catalog, request)
    }

    async fn list_bookings(&self, email_filter: Option<&str>) -> Vec<Booking> {
        self.inner
            .read()
            .await
            .ledger
            .list(email_filter)
            .cloned()
            .collect()
    }

    async fn get_booking(&self, id: Uuid) -> CoreResult<Booking> {
        self.inner.read().await.ledger.get(id).cloned()
    }

    async fn cancel_booking(&self, id: Uuid) -> CoreResult<CancelOutcome> {
        let mut guard = self.inner.write().await;
        let Reservations { catalog, ledger } = &mut *guard;
        ledger.cancel(catalog, id)
    }

    async fn stats(&self) -> BookingStats {
        let guard = self.inner.read().await;
        guard.ledger.stats(guard.catalog.len())
    }
}
