//! Lodging domain errors

use core_kernel::{CoreError, MoneyError};
use thiserror::Error;

/// Errors that can occur in the lodging domain
///
/// Every variant is recoverable: the operation that produced it left the
/// ledger exactly as it was.
#[derive(Debug, Error)]
pub enum LodgingError {
    /// Client with the given ID was not found
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Reservation with the given ID was not found
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// A check-in or check-out date could not be parsed
    #[error("Invalid {field} date '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    /// Check-out does not fall after check-in
    #[error("Invalid stay: check-out {check_out} must be after check-in {check_in}")]
    InvalidStayPeriod { check_in: String, check_out: String },

    /// Lifecycle action not allowed from the current state
    #[error("Cannot {action} reservation {reservation}: it is {from}")]
    InvalidStateTransition {
        reservation: String,
        from: String,
        action: String,
    },

    /// A client name matched more than one registered client
    #[error("Client name '{name}' is ambiguous: {matches} clients share it")]
    AmbiguousClient { name: String, matches: usize },

    /// Invalid input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// No free identifier could be drawn
    #[error("Identifier space exhausted for {0} records")]
    IdSpaceExhausted(&'static str),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl LodgingError {
    pub fn validation(message: impl Into<String>) -> Self {
        LodgingError::Validation(message.into())
    }

    /// Returns true for errors caused by an unknown identifier
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LodgingError::ClientNotFound(_) | LodgingError::ReservationNotFound(_)
        )
    }
}
