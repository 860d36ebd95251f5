//! Lodging Domain - Reservation Ledger
//!
//! This crate tracks clients, room reservations, the stay lifecycle and
//! payments, and derives a per-client billing report.
//!
//! # Reservation Lifecycle
//!
//! ```text
//! Booked -> CheckedIn -> CheckedOut
//! ```
//!
//! Checkout bills `nights × rate_per_night`. The report aggregates
//! checked-out stays and their payments by client.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_lodging::{ClientRef, LedgerConfig, LedgerStore, PaymentMethod};
//!
//! let mut store = LedgerStore::new(LedgerConfig::default())?;
//! let reservation = store.create_reservation(
//!     ClientRef::by_name("Alice"), "101", "2024-01-01", "2024-01-04",
//! )?;
//! store.checkin(&reservation.id)?;
//! let due = store.checkout(&reservation.id)?;
//! store.process_payment(&reservation.id, PaymentMethod::Cash, due.amount())?;
//! let report = store.report();
//! ```

pub mod client;
pub mod reservation;
pub mod payment;
pub mod billing;
pub mod ledger;
pub mod report;
pub mod shared;
pub mod config;
pub mod error;

pub use client::{Client, NewClient};
pub use reservation::{Reservation, ReservationStatus, StayAction};
pub use payment::{Payment, PaymentMethod};
pub use ledger::{ClientRef, LedgerStore};
pub use report::{generate_report, ReportRow};
pub use shared::SharedLedger;
pub use config::LedgerConfig;
pub use error::LodgingError;
