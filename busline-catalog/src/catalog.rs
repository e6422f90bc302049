use busline_core::{BusQuery, CoreError, CoreResult, RouteSearch};
use busline_shared::{Bus, BusId};
use std::collections::HashMap;

/// The set of buses on sale, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buses: Vec<Bus>,
    index: HashMap<BusId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and inconsistent seat counts
    pub fn new(buses: impl IntoIterator<Item = Bus>) -> CoreResult<Self> {
        let mut catalog = Self::default();
        for bus in buses {
            catalog.insert(bus)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, bus: Bus) -> CoreResult<()> {
        if self.index.contains_key(&bus.id) {
            return Err(CoreError::validation(
                "id",
                format!("duplicate bus id {}", bus.id),
            ));
        }
        if bus.available > bus.seats {
            return Err(CoreError::validation(
                "available",
                format!(
                    "bus {} has {} available seats but only {} in total",
                    bus.id, bus.available, bus.seats
                ),
            ));
        }
        if !bus.price.is_finite() || bus.price < 0.0 {
            return Err(CoreError::validation(
                "price",
                format!("bus {} has invalid price {}", bus.id, bus.price),
            ));
        }

        self.index.insert(bus.id, self.buses.len());
        self.buses.push(bus);
        Ok(())
    }

    /// Buses matching `query`, in catalog order unless a sort key is given.
    /// Sorting is stable, so ties keep catalog order.
    pub fn list(&self, query: &BusQuery) -> Vec<Bus> {
        let mut matching: Vec<Bus> = self
            .buses
            .iter()
            .filter(|bus| query.matches(bus))
            .cloned()
            .collect();

        if let Some(key) = query.sort_by {
            matching.sort_by(|a, b| key.compare(a, b));
        }

        tracing::debug!(?query, matched = matching.len(), "Catalog listing");
        matching
    }

    /// Buses running exactly `route`, in catalog order
    pub fn between(&self, route: &RouteSearch) -> Vec<Bus> {
        let found: Vec<Bus> = self
            .buses
            .iter()
            .filter(|bus| route.matches(bus))
            .cloned()
            .collect();
        tracing::debug!(route = %route.describe(), found = found.len(), "Route search");
        found
    }

    pub fn get(&self, id: BusId) -> CoreResult<&Bus> {
        self.lookup(id).ok_or_else(|| CoreError::bus_not_found(id))
    }

    /// Change the per-seat price. Existing bookings keep the price they were sold at.
    pub fn set_price(&mut self, id: BusId, price: f64) -> CoreResult<()> {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::validation("price", format!("invalid price {price}")));
        }
        let bus = self.lookup_mut(id).ok_or_else(|| CoreError::bus_not_found(id))?;
        bus.price = price;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    pub(crate) fn lookup(&self, id: BusId) -> Option<&Bus> {
        self.index.get(&id).map(|&i| &self.buses[i])
    }

    pub(crate) fn lookup_mut(&mut self, id: BusId) -> Option<&mut Bus> {
        let i = *self.index.get(&id)?;
        self.buses.get_mut(i)
    }
}
