use busline_core::{CoreError, CoreResult, SeatInventory};
use busline_shared::{Bus, BusId};

use crate::Catalog;

impl SeatInventory for Catalog {
    fn bus(&self, id: BusId) -> Option<&Bus> {
        self.lookup(id)
    }

    fn reserve(&mut self, id: BusId, seats: u32) -> CoreResult<Bus> {
        let bus = self
            .lookup_mut(id)
            .ok_or_else(|| CoreError::bus_not_found(id))?;

        if bus.available < seats {
            return Err(CoreError::Capacity {
                requested: seats,
                available: bus.available,
            });
        }

        bus.available -= seats;
        Ok(bus.clone())
    }

    fn release(&mut self, id: BusId, seats: u32) -> Option<u32> {
        let bus = self.lookup_mut(id)?;
        let restored = bus.available.saturating_add(seats);
        if restored > bus.seats {
            tracing::warn!(
                bus_id = %id,
                restored,
                capacity = bus.seats,
                "Seat release exceeds capacity, clamping"
            );
        }
        bus.available = restored.min(bus.seats);
        Some(bus.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::bus;

    fn catalog() -> Catalog {
        Catalog::new(vec![bus(1, "New York", "Boston", "08:00 AM", 45.0, "AC Sleeper")]).unwrap()
    }

    #[test]
    fn test_inventory_lifecycle() {
        let mut catalog = catalog();

        let after = catalog.reserve(BusId(1), 10).unwrap();
        assert_eq!(after.available, 25);
        assert_eq!(catalog.bus(BusId(1)).unwrap().available, 25);

        assert_eq!(catalog.release(BusId(1), 10), Some(35));
    }

    #[test]
    fn test_reserve_beyond_capacity_leaves_availability() {
        let mut catalog = catalog();
        let err = catalog.reserve(BusId(1), 36).unwrap_err();
        assert_eq!(err, CoreError::Capacity { requested: 36, available: 35 });
        assert_eq!(catalog.bus(BusId(1)).unwrap().available, 35);

        // Exactly the remaining seats is allowed
        assert_eq!(catalog.reserve(BusId(1), 35).unwrap().available, 0);
        assert!(!catalog.bus(BusId(1)).unwrap().has_available_seats());
    }

    #[test]
    fn test_unknown_bus() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.reserve(BusId(999), 1).unwrap_err(),
            CoreError::bus_not_found(BusId(999))
        );
        assert_eq!(catalog.release(BusId(999), 1), None);
    }

    #[test]
    fn test_release_never_exceeds_capacity() {
        let mut catalog = catalog();
        assert_eq!(catalog.release(BusId(1), 100), Some(40));
        let bus = catalog.bus(BusId(1)).unwrap();
        assert!(bus.available <= bus.seats);
    }
}
