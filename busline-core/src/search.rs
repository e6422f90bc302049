use busline_shared::Bus;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::CoreError;

/// Ordering applied to a bus listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Cheapest first
    Price,
    /// Lexicographic on the departure display string
    Departure,
}

impl SortKey {
    pub fn compare(&self, a: &Bus, b: &Bus) -> Ordering {
        match self {
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Departure => a.departure.cmp(&b.departure),
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "departure" => Ok(SortKey::Departure),
            other => Err(CoreError::validation(
                "sortBy",
                format!("unsupported sort key '{other}', expected 'price' or 'departure'"),
            )),
        }
    }
}

/// Catalog filter. Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub bus_type: Option<String>,
    pub sort_by: Option<SortKey>,
}

impl BusQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_city(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to_city(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn bus_type(mut self, bus_type: impl Into<String>) -> Self {
        self.bus_type = Some(bus_type.into());
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    /// Whether `bus` passes every filter that is set
    pub fn matches(&self, bus: &Bus) -> bool {
        contains_ignore_case(&bus.from, self.from.as_deref())
            && contains_ignore_case(&bus.to, self.to.as_deref())
            && equals_ignore_case(&bus.bus_type, self.bus_type.as_deref())
    }
}

/// Exact origin/destination lookup, both cities required
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSearch {
    from: String,
    to: String,
}

impl RouteSearch {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Result<Self, CoreError> {
        let from = active(from).ok_or_else(|| CoreError::validation("from", "is required"))?;
        let to = active(to).ok_or_else(|| CoreError::validation("to", "is required"))?;
        Ok(Self {
            from: from.to_lowercase(),
            to: to.to_lowercase(),
        })
    }

    /// Case-insensitive equality on both cities
    pub fn matches(&self, bus: &Bus) -> bool {
        bus.from.trim().to_lowercase() == self.from && bus.to.trim().to_lowercase() == self.to
    }

    pub fn describe(&self) -> String {
        format!("{} -> {}", self.from, self.to)
    }
}

fn active(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}

fn contains_ignore_case(field: &str, filter: Option<&str>) -> bool {
    match active(filter) {
        Some(needle) => field.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn equals_ignore_case(field: &str, filter: Option<&str>) -> bool {
    match active(filter) {
        Some(expected) => field.trim().to_lowercase() == expected.to_lowercase(),
        None => true,
    }
}
