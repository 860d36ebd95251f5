//! Shell error handling

use serde::Serialize;
use thiserror::Error;

use domain_lodging::LodgingError;

/// Shell error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unterminated quote in: {0}")]
    UnterminatedQuote(String),

    #[error("Line {0} is not valid UTF-8")]
    InvalidEncoding(usize),

    #[error(transparent)]
    Lodging(#[from] LodgingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Short machine-readable category
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::UnknownCommand(_)
            | CliError::Usage(_)
            | CliError::UnterminatedQuote(_)
            | CliError::InvalidEncoding(_) => "bad_command",
            CliError::InvalidAmount(_) => "validation_error",
            CliError::Lodging(err) if err.is_not_found() => "not_found",
            CliError::Lodging(err) => match err {
                LodgingError::InvalidStateTransition { .. } => "invalid_state",
                LodgingError::AmbiguousClient { .. } => "conflict",
                LodgingError::IdSpaceExhausted(_) => "exhausted",
                _ => "validation_error",
            },
            CliError::Io(_) | CliError::Json(_) => "internal_error",
        }
    }

    /// Whether the shell should stop instead of reporting and continuing
    pub fn is_fatal(&self) -> bool {
        matches!(self, CliError::Io(_))
    }
}

/// Error line written back to the caller
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&CliError> for ErrorResponse {
    fn from(err: &CliError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}
