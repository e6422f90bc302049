use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::bus::{Bus, BusId};
use crate::pii::Masked;

/// Booking lifecycle. The only transition is `Confirmed -> Cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A seat sale against a bus.
///
/// `bus_id` is a lookup key into the catalog, not an owning reference.
/// `total_price` is fixed when the booking is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub bus_id: BusId,
    pub passenger_name: String,
    pub email: Masked<String>,
    pub seats: u32,
    pub total_price: f64,
    pub payment_method: String,
    pub status: BookingStatus,
    pub pnr: String,
    pub booking_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// New confirmed booking priced from the bus as it is right now
    pub fn confirmed(
        bus: &Bus,
        passenger_name: String,
        email: String,
        seats: u32,
        payment_method: String,
        pnr: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            bus_id: bus.id,
            passenger_name,
            email: Masked::new(email),
            seats,
            total_price: bus.fare_for(seats),
            payment_method,
            status: BookingStatus::Confirmed,
            pnr,
            booking_date: Utc::now(),
            cancelled_at: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Mark as cancelled. Returns `true` only when this call made the transition.
    pub fn cancel(&mut self) -> bool {
        if !self.is_confirmed() {
            return false;
        }
        self.status = BookingStatus::Cancelled;
        self.cancelled_at = Some(Utc::now());
        true
    }

    pub fn email_contains(&self, needle_lowercase: &str) -> bool {
        self.email.expose().to_lowercase().contains(needle_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus() -> Bus {
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
            amenities: vec![],
        }
    }

    #[test]
    fn test_cancel_transitions_once() {
        let mut booking = Booking::confirmed(
            &bus(),
            "John Doe".to_string(),
            "john@example.com".to_string(),
            2,
            "credit_card".to_string(),
            "PNRABCDEFGH".to_string(),
        );
        assert_eq!(booking.total_price, 90.0);
        assert!(booking.is_confirmed());

        assert!(booking.cancel());
        assert_eq!(booking.status, BookingStatus::Cancelled);
        let stamped = booking.cancelled_at;
        assert!(stamped.is_some());

        assert!(!booking.cancel());
        assert_eq!(booking.cancelled_at, stamped);
    }

    #[test]
    fn test_booking_serializes_camel_case() {
        let booking = Booking::confirmed(
            &bus(),
            "John Doe".to_string(),
            "john@example.com".to_string(),
            1,
            "upi".to_string(),
            "PNRABCDEFGH".to_string(),
        );
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["passengerName"], "John Doe");
        assert_eq!(value["email"], "john@example.com");
        assert_eq!(value["busId"], 1);
        assert_eq!(value["status"], "confirmed");
        assert!(value.get("cancelledAt").is_none());
        assert!(!format!("{:?}", booking).contains("john@example.com"));
    }
}
