//! Ledger configuration

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, IdSpace, Money};
use crate::error::LodgingError;

/// Default nightly rate in currency units
pub const DEFAULT_RATE_PER_NIGHT: Decimal = Decimal::ONE_HUNDRED;

/// Tunables for a [`LedgerStore`](crate::LedgerStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Amount charged per night at checkout
    pub rate_per_night: Decimal,
    /// Currency of all charges and payments
    pub currency: Currency,
    /// Space identifiers are drawn from
    pub id_space: IdSpace,
    /// Draws allowed before an identifier collision is reported as exhaustion
    pub max_id_attempts: u32,
    /// Seed for a reproducible identifier sequence
    pub id_seed: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rate_per_night: DEFAULT_RATE_PER_NIGHT,
            currency: Currency::USD,
            id_space: IdSpace::default(),
            max_id_attempts: 32,
            id_seed: None,
        }
    }
}

impl LedgerConfig {
    pub fn with_rate(mut self, rate_per_night: Decimal) -> Self {
        self.rate_per_night = rate_per_night;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_id_space(mut self, id_space: IdSpace) -> Self {
        self.id_space = id_space;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    /// The nightly rate as money in the ledger currency
    pub fn rate(&self) -> Money {
        Money::new(self.rate_per_night, self.currency)
    }

    /// Rejects configurations the store cannot operate with
    pub fn validate(&self) -> Result<(), LodgingError> {
        if self.rate_per_night.is_sign_negative() && !self.rate_per_night.is_zero() {
            return Err(LodgingError::validation(format!(
                "rate per night must not be negative, got {}",
                self.rate_per_night
            )));
        }
        if self.max_id_attempts == 0 {
            return Err(LodgingError::validation("max_id_attempts must be at least 1"));
        }
        self.id_space.validate()?;
        Ok(())
    }
}
