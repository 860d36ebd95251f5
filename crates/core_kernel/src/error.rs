//! Core error types used across the ledger

use thiserror::Error;

/// Errors raised by kernel types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier space or generator was configured with unusable values
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
