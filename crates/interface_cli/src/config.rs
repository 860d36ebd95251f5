//! Shell configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{Currency, IdSpace};
use domain_lodging::config::{LedgerConfig, DEFAULT_RATE_PER_NIGHT};

/// Prefix for environment variables, e.g. `LODGING_RATE_PER_NIGHT`
pub const ENV_PREFIX: &str = "LODGING";

/// Shell configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Amount charged per night
    pub rate_per_night: Decimal,
    /// Ledger currency
    pub currency: Currency,
    /// Width of numeric identifiers
    pub id_digits: u32,
    /// Use UUID identifiers instead of numeric ones
    pub id_uuid: bool,
    /// Seed for reproducible identifiers
    pub id_seed: Option<u64>,
    /// Identifier draws before giving up on a collision
    pub max_id_attempts: u32,
    /// Log level
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rate_per_night: DEFAULT_RATE_PER_NIGHT,
            currency: Currency::USD,
            id_digits: 5,
            id_uuid: false,
            id_seed: None,
            max_id_attempts: 32,
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `LODGING_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let source = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_config(source)
    }

    /// Loads from the environment, falling back to defaults if it cannot be parsed
    ///
    /// The parse error, if any, is handed back so it can be logged once
    /// tracing is up.
    pub fn load() -> (Self, Option<config::ConfigError>) {
        match Self::from_env() {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Deserializes from an already assembled `config::Config`
    pub fn from_config(source: config::Config) -> Result<Self, config::ConfigError> {
        source.try_deserialize()
    }

    /// The ledger settings carried by this configuration
    pub fn ledger_config(&self) -> LedgerConfig {
        let id_space = if self.id_uuid {
            IdSpace::Uuid
        } else {
            IdSpace::Numeric {
                digits: self.id_digits,
            }
        };

        LedgerConfig {
            rate_per_night: self.rate_per_night,
            currency: self.currency,
            id_space,
            max_id_attempts: self.max_id_attempts,
            id_seed: self.id_seed,
        }
    }
}
