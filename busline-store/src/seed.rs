use busline_catalog::Catalog;
use busline_core::CoreError;
use busline_shared::{Bus, BusId};
use std::path::Path;

use crate::app_config::CatalogConfig;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid seed data: {0}")]
    Invalid(#[from] CoreError),
}

/// Catalog from the configured seed file, or the built-in buses when none is set
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, SeedError> {
    let buses = match &config.seed_file {
        Some(path) => load_buses(path)?,
        None => default_buses(),
    };
    tracing::info!(buses = buses.len(), "Seeding catalog");
    Ok(Catalog::new(buses)?)
}

pub fn load_buses(path: impl AsRef<Path>) -> Result<Vec<Bus>, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn default_buses() -> Vec<Bus> {
    vec![
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
            amenities: vec![
                "WiFi".to_string(),
                "Charging Port".to_string(),
                "Snacks".to_string(),
            ],
        },
        Bus {
            id: BusId(2),
            name: "Luxury Coach Plus".to_string(),
            from: "New York".to_string(),
            to: "Washington DC".to_string(),
            departure: "09:30 AM".to_string(),
            arrival: "02:30 PM".to_string(),
            duration: "5h".to_string(),
            price: 65.0,
            seats: 50,
            available: 42,
            bus_type: "Luxury Coach".to_string(),
            operator: "Premium Travels".to_string(),
            amenities: vec![
                "WiFi".to_string(),
                "Charging Port".to_string(),
                "Meal".to_string(),
                "Entertainment".to_string(),
            ],
        },
    ]
}
