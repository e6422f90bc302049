use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric identifier of a bus in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusId(pub u32);

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BusId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A scheduled bus with its seat inventory.
///
/// `departure`, `arrival` and `duration` are display strings and carry no
/// scheduling semantics. `available` never exceeds `seats`; the catalog is the
/// only writer of that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    #[serde(default)]
    pub duration: String,
    pub price: f64,
    pub seats: u32,
    pub available: u32,
    #[serde(rename = "type")]
    pub bus_type: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Bus {
    pub fn has_available_seats(&self) -> bool {
        self.available > 0
    }

    /// Price of `seats` seats at the current per-seat price
    pub fn fare_for(&self, seats: u32) -> f64 {
        self.price * f64::from(seats)
    }

    pub fn sold(&self) -> u32 {
        self.seats.saturating_sub(self.available)
    }

    /// Fraction of capacity sold, 0.0 for a bus with no seats
    pub fn utilization(&self) -> f64 {
        if self.seats == 0 {
            0.0
        } else {
            f64::from(self.sold()) / f64::from(self.seats)
        }
    }
}
