//! Strongly-typed identifiers for ledger entities
//!
//! Identifiers are short strings handed out by an [`IdGenerator`]. Newtype
//! wrappers keep a client id from being passed where a reservation id is
//! expected, while the string form stays what callers type into forms.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the entity kind used in messages
            pub fn kind() -> &'static str {
                $kind
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_id!(ClientId, "client");
define_id!(ReservationId, "reservation");
define_id!(PaymentId, "payment");

/// The space identifiers are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdSpace {
    /// Fixed-width decimal strings, e.g. `digits = 5` gives 10000..=99999
    Numeric { digits: u32 },
    /// Random v4 UUIDs in hyphenated form
    Uuid,
}

impl IdSpace {
    /// Largest supported width for numeric identifiers
    pub const MAX_DIGITS: u32 = 18;

    /// Checks that the space can actually produce identifiers
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            IdSpace::Numeric { digits } if *digits == 0 || *digits > Self::MAX_DIGITS => {
                Err(CoreError::configuration(format!(
                    "numeric id width must be between 1 and {}, got {}",
                    Self::MAX_DIGITS,
                    digits
                )))
            }
            _ => Ok(()),
        }
    }

    /// Number of distinct identifiers, if the space is small enough to count
    pub fn capacity(&self) -> Option<u64> {
        match self {
            IdSpace::Numeric { digits } => {
                let (low, high) = numeric_bounds(*digits);
                Some(high - low + 1)
            }
            IdSpace::Uuid => None,
        }
    }
}

impl Default for IdSpace {
    fn default() -> Self {
        IdSpace::Numeric { digits: 5 }
    }
}

fn numeric_bounds(digits: u32) -> (u64, u64) {
    (10_u64.pow(digits - 1), 10_u64.pow(digits) - 1)
}

/// Produces identifiers uniformly at random from an [`IdSpace`]
///
/// The generator performs no uniqueness check of its own; owners of a keyed
/// collection are expected to retry on collision.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    space: IdSpace,
    rng: StdRng,
}

impl IdGenerator {
    /// Creates a generator seeded from OS entropy
    pub fn new(space: IdSpace) -> Result<Self, CoreError> {
        space.validate()?;
        Ok(Self {
            space,
            rng: StdRng::from_entropy(),
        })
    }

    /// Creates a generator with a reproducible sequence
    pub fn seeded(space: IdSpace, seed: u64) -> Result<Self, CoreError> {
        space.validate()?;
        Ok(Self {
            space,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Draws the next identifier
    pub fn new_id(&mut self) -> String {
        match self.space {
            IdSpace::Numeric { digits } => {
                let (low, high) = numeric_bounds(digits);
                self.rng.gen_range(low..=high).to_string()
            }
            IdSpace::Uuid => {
                let bytes: [u8; 16] = self.rng.gen();
                uuid::Builder::from_random_bytes(bytes)
                    .into_uuid()
                    .hyphenated()
                    .to_string()
            }
        }
    }

    /// Draws identifiers until `is_taken` rejects none, giving up after `max_attempts`
    ///
    /// Returns `None` when every attempt collided.
    pub fn new_unique_id<F>(&mut self, max_attempts: u32, mut is_taken: F) -> Option<String>
    where
        F: FnMut(&str) -> bool,
    {
        (0..max_attempts)
            .map(|_| self.new_id())
            .find(|candidate| !is_taken(candidate))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            space: IdSpace::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

/// Parses a UUID-shaped identifier, used to sanity-check `IdSpace::Uuid` output
pub fn is_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_space_is_five_digits() {
        let mut generator = IdGenerator::default();
        for _ in 0..200 {
            let id = generator.new_id();
            assert_eq!(id.len(), 5);
            let value: u64 = id.parse().unwrap();
            assert!((10_000..=99_999).contains(&value));
        }
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let mut a = IdGenerator::seeded(IdSpace::default(), 7).unwrap();
        let mut b = IdGenerator::seeded(IdSpace::default(), 7).unwrap();
        let first: Vec<_> = (0..10).map(|_| a.new_id()).collect();
        let second: Vec<_> = (0..10).map(|_| b.new_id()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_digits_rejected() {
        let result = IdGenerator::new(IdSpace::Numeric { digits: 0 });
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_unique_id_skips_taken() {
        let mut generator = IdGenerator::seeded(IdSpace::Numeric { digits: 1 }, 3).unwrap();
        let id = generator.new_unique_id(1000, |c| c != "4").unwrap();
        assert_eq!(id, "4");
    }

    #[test]
    fn test_id_display_is_raw() {
        let id = ClientId::new("12345");
        assert_eq!(id.to_string(), "12345");
        assert_eq!(ClientId::kind(), "client");
    }
}
