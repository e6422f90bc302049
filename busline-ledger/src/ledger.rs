use busline_core::validation::{check_seat_limit, validate_booking, DEFAULT_MAX_SEATS};
use busline_core::{
    BookingRequest, BookingStats, CancelOutcome, CoreError, CoreResult, SeatInventory,
};
use busline_shared::Booking;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::pnr;

/// Limits and defaults applied to new bookings
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerPolicy {
    pub max_seats_per_booking: u32,
    pub default_payment_method: String,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            max_seats_per_booking: DEFAULT_MAX_SEATS,
            default_payment_method: "credit_card".to_string(),
        }
    }
}

/// Append-only record of bookings.
///
/// Seats are taken from and returned to a [`SeatInventory`] passed into each
/// mutating call; the ledger never holds on to buses itself.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
    index: HashMap<Uuid, usize>,
    pnrs: HashSet<String>,
    policy: LedgerPolicy,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: LedgerPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Sell seats on a bus.
    ///
    /// Checks run in order: request fields, bus lookup, availability, then the
    /// per-booking seat limit. All of them run before the inventory is
    /// touched, so an error leaves both the inventory and the ledger as they
    /// were.
    pub fn book<I>(&mut self, inventory: &mut I, request: BookingRequest) -> CoreResult<Booking>
    where
        I: SeatInventory + ?Sized,
    {
        let valid = validate_booking(&request)?;

        let available = inventory
            .bus(request.bus_id)
            .map(|bus| bus.available)
            .ok_or_else(|| CoreError::bus_not_found(request.bus_id))?;
        if valid.seats > available {
            tracing::warn!(
                bus_id = %request.bus_id,
                requested = valid.seats,
                available,
                "Booking rejected, not enough seats"
            );
            return Err(CoreError::Capacity {
                requested: valid.seats,
                available,
            });
        }

        check_seat_limit(valid.seats, self.policy.max_seats_per_booking)?;

        let bus = inventory.reserve(request.bus_id, valid.seats)?;

        let payment_method = valid
            .payment_method
            .unwrap_or_else(|| self.policy.default_payment_method.clone());
        let pnr = self.next_pnr();

        let booking = Booking::confirmed(
            &bus,
            valid.passenger_name,
            valid.email,
            valid.seats,
            payment_method,
            pnr,
        );

        self.index.insert(booking.id, self.bookings.len());
        self.bookings.push(booking.clone());

        tracing::info!(
            booking_id = %booking.id,
            bus_id = %bus.id,
            seats = booking.seats,
            pnr = %booking.pnr,
            email = %booking.email.redacted(),
            available = bus.available,
            "Booking confirmed"
        );

        Ok(booking)
    }

    /// Bookings in insertion order, optionally only those whose email
    /// contains `email_filter` (case-insensitive)
    pub fn list(&self, email_filter: Option<&str>) -> impl Iterator<Item = &Booking> + '_ {
        let needle = email_filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);

        self.bookings.iter().filter(move |booking| match &needle {
            Some(needle) => booking.email_contains(needle),
            None => true,
        })
    }

    pub fn get(&self, id: Uuid) -> CoreResult<&Booking> {
        self.index
            .get(&id)
            .map(|&i| &self.bookings[i])
            .ok_or_else(|| CoreError::booking_not_found(id))
    }

    /// Cancel a booking and give its seats back.
    ///
    /// Seats are credited only on the confirmed -> cancelled transition;
    /// cancelling again succeeds without touching the inventory.
    pub fn cancel<I>(&mut self, inventory: &mut I, id: Uuid) -> CoreResult<CancelOutcome>
    where
        I: SeatInventory + ?Sized,
    {
        let i = *self
            .index
            .get(&id)
            .ok_or_else(|| CoreError::booking_not_found(id))?;
        let booking = &mut self.bookings[i];

        if !booking.cancel() {
            tracing::debug!(booking_id = %id, "Booking already cancelled");
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        let available = inventory.release(booking.bus_id, booking.seats);
        let restored_seats = match available {
            Some(available) => {
                tracing::info!(
                    booking_id = %id,
                    bus_id = %booking.bus_id,
                    seats = booking.seats,
                    available,
                    "Booking cancelled"
                );
                booking.seats
            }
            None => {
                tracing::warn!(
                    booking_id = %id,
                    bus_id = %booking.bus_id,
                    "Booking cancelled but its bus is no longer in the catalog"
                );
                0
            }
        };

        Ok(CancelOutcome::Cancelled {
            restored_seats,
            available,
        })
    }

    pub fn stats(&self, total_buses: usize) -> BookingStats {
        let confirmed = self.bookings.iter().filter(|b| b.is_confirmed());
        let (confirmed_bookings, total_revenue) =
            confirmed.fold((0usize, 0.0_f64), |(count, sum), b| (count + 1, sum + b.total_price));

        BookingStats {
            total_buses,
            total_bookings: self.bookings.len(),
            confirmed_bookings,
            total_revenue,
        }
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn next_pnr(&mut self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let code = pnr::generate(&mut rng);
            if self.pnrs.insert(code.clone()) {
                return code;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busline_catalog::Catalog;
    use busline_shared::{BookingStatus, Bus, BusId};

    fn express() -> Bus {
        Bus {
            id: BusId(1),
            name: "Express Deluxe".to_string(),
            from: "New York".to_string(),
            to: "Boston".to_string(),
            departure: "08:00 AM".to_string(),
            arrival: "12:00 PM".to_string(),
            duration: "4h".to_string(),
            price: 45.0,
            seats: 40,
            available: 35,
            bus_type: "AC Sleeper".to_string(),
            operator: "City Express".to_string(),
            amenities: vec!["WiFi".to_string()],
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![express()]).unwrap()
    }

    fn request(bus_id: u32, seats: i64) -> BookingRequest {
        BookingRequest {
            bus_id: BusId(bus_id),
            passenger_name: "John Doe".to_string(),
            email: "john@x.com".to_string(),
            seats,
            payment_method: None,
        }
    }

    fn available(catalog: &Catalog) -> u32 {
        catalog.bus(BusId(1)).unwrap().available
    }

    #[test]
    fn test_book_decrements_and_prices() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let booking = ledger.book(&mut catalog, request(1, 2)).unwrap();

        assert_eq!(available(&catalog), 33);
        assert_eq!(booking.total_price, 90.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_method, "credit_card");
        assert!(booking.pnr.starts_with("PNR"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(booking.id).unwrap().pnr, booking.pnr);
    }

    #[test]
    fn test_capacity_error_names_availability() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::with_policy(LedgerPolicy {
            max_seats_per_booking: 100,
            ..LedgerPolicy::default()
        });

        let err = ledger.book(&mut catalog, request(1, 100)).unwrap_err();
        assert_eq!(err, CoreError::Capacity { requested: 100, available: 35 });
        assert!(err.to_string().contains("35"));
        assert_eq!(available(&catalog), 35);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_capacity_checked_before_seat_limit() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let err = ledger.book(&mut catalog, request(1, 100)).unwrap_err();
        assert_eq!(err, CoreError::Capacity { requested: 100, available: 35 });

        // Fits on the bus but exceeds the default limit of 10
        let err = ledger.book(&mut catalog, request(1, 11)).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "seats", .. }));

        assert_eq!(available(&catalog), 35);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_unknown_bus_creates_nothing() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let err = ledger.book(&mut catalog, request(999, 2)).unwrap_err();
        assert_eq!(err, CoreError::bus_not_found(BusId(999)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_invalid_fields_leave_inventory_untouched() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let mut bad_email = request(1, 2);
        bad_email.email = "not-an-email".to_string();
        assert!(ledger.book(&mut catalog, bad_email).is_err());

        let mut no_name = request(1, 2);
        no_name.passenger_name = "  ".to_string();
        assert!(ledger.book(&mut catalog, no_name).is_err());

        assert_eq!(available(&catalog), 35);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_cancel_round_trip_restores_availability() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let booking = ledger.book(&mut catalog, request(1, 4)).unwrap();
        assert_eq!(available(&catalog), 31);

        let outcome = ledger.cancel(&mut catalog, booking.id).unwrap();
        assert_eq!(
            outcome,
            CancelOutcome::Cancelled { restored_seats: 4, available: Some(35) }
        );
        assert_eq!(available(&catalog), 35);

        let stored = ledger.get(booking.id).unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
        assert!(stored.cancelled_at.is_some());
    }

    #[test]
    fn test_cancel_twice_credits_once() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let booking = ledger.book(&mut catalog, request(1, 3)).unwrap();
        ledger.cancel(&mut catalog, booking.id).unwrap();

        let again = ledger.cancel(&mut catalog, booking.id).unwrap();
        assert_eq!(again, CancelOutcome::AlreadyCancelled);
        assert_eq!(available(&catalog), 35);
    }

    #[test]
    fn test_cancel_unknown_booking() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();
        let id = Uuid::new_v4();

        assert_eq!(
            ledger.cancel(&mut catalog, id).unwrap_err(),
            CoreError::booking_not_found(id)
        );
    }

    #[test]
    fn test_cancel_with_missing_bus_is_reconciled() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();
        let booking = ledger.book(&mut catalog, request(1, 2)).unwrap();

        // The booking's bus does not exist in this inventory
        let mut empty = Catalog::default();
        let outcome = ledger.cancel(&mut empty, booking.id).unwrap();
        assert_eq!(
            outcome,
            CancelOutcome::Cancelled { restored_seats: 0, available: None }
        );
        assert_eq!(ledger.get(booking.id).unwrap().status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_total_price_frozen_after_reprice() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let booking = ledger.book(&mut catalog, request(1, 2)).unwrap();
        catalog.set_price(BusId(1), 99.0).unwrap();

        assert_eq!(ledger.get(booking.id).unwrap().total_price, 90.0);
        let later = ledger.book(&mut catalog, request(1, 2)).unwrap();
        assert_eq!(later.total_price, 198.0);
    }

    #[test]
    fn test_list_filters_by_email_in_order() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        for email in ["a@example.com", "B@Other.org", "c@example.com"] {
            let mut req = request(1, 1);
            req.email = email.to_string();
            ledger.book(&mut catalog, req).unwrap();
        }

        let all: Vec<&str> = ledger.list(None).map(|b| b.email.expose().as_str()).collect();
        assert_eq!(all, vec!["a@example.com", "B@Other.org", "c@example.com"]);

        let matched: Vec<&str> = ledger
            .list(Some("EXAMPLE.com"))
            .map(|b| b.email.expose().as_str())
            .collect();
        assert_eq!(matched, vec!["a@example.com", "c@example.com"]);

        assert_eq!(ledger.list(Some("other")).count(), 1);
        assert_eq!(ledger.list(Some("")).count(), 3);
    }

    #[test]
    fn test_stats_count_confirmed_revenue_only() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();

        let first = ledger.book(&mut catalog, request(1, 2)).unwrap();
        ledger.book(&mut catalog, request(1, 1)).unwrap();
        ledger.cancel(&mut catalog, first.id).unwrap();

        let stats = ledger.stats(catalog.len());
        assert_eq!(stats.total_buses, 1);
        assert_eq!(stats.total_bookings, 2);
        assert_eq!(stats.confirmed_bookings, 1);
        assert_eq!(stats.total_revenue, 45.0);
    }

    #[test]
    fn test_availability_stays_within_bounds() {
        let mut catalog = catalog();
        let mut ledger = BookingLedger::new();
        let mut ids = Vec::new();

        for seats in [10, 10, 10, 10, 5, 3] {
            if let Ok(booking) = ledger.book(&mut catalog, request(1, seats)) {
                ids.push(booking.id);
            }
            let bus = catalog.bus(BusId(1)).unwrap();
            assert!(bus.available <= bus.seats);
        }
        assert_eq!(available(&catalog), 0);

        for id in ids.iter().chain(ids.iter()) {
            ledger.cancel(&mut catalog, *id).unwrap();
            let bus = catalog.bus(BusId(1)).unwrap();
            assert!(bus.available <= bus.seats);
        }
        assert_eq!(available(&catalog), 35);
    }
}
