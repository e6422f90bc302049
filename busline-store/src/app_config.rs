use serde::Deserialize;
use std::env;

use busline_core::validation::DEFAULT_MAX_SEATS;
use busline_ledger::LedgerPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BookingConfig {
    #[serde(default = "default_max_seats")]
    pub max_seats_per_booking: u32,
    #[serde(default = "default_payment_method")]
    pub default_payment_method: String,
}

fn default_max_seats() -> u32 { DEFAULT_MAX_SEATS }

fn default_payment_method() -> String { "credit_card".to_string() }

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_seats_per_booking: default_max_seats(),
            default_payment_method: default_payment_method(),
        }
    }
}

impl From<&BookingConfig> for LedgerPolicy {
    fn from(config: &BookingConfig) -> Self {
        Self {
            max_seats_per_booking: config.max_seats_per_booking,
            default_payment_method: config.default_payment_method.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON array of buses replacing the built-in seed
    pub seed_file: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `BUSLINE__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("BUSLINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
