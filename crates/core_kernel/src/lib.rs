//! Core Kernel - Foundational types for the lodging ledger
//!
//! This crate provides the building blocks shared by the domain and
//! interface crates:
//! - Money types with precise decimal arithmetic
//! - Typed identifiers and the identifier generator
//! - Common error type

pub mod money;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{ClientId, ReservationId, PaymentId, IdGenerator, IdSpace};
pub use error::CoreError;
