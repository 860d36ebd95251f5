//! Lodging clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::ClientId;
use crate::error::LodgingError;

/// Contact placeholder used when registration leaves it blank
pub const DEFAULT_CONTACT: &str = "Not Provided";

/// A registered guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Display name, not necessarily unique
    pub name: String,
    /// Free-form contact person or note
    pub contact: String,
    pub phone: String,
    pub email: String,
    /// When the client was registered
    pub registered_at: DateTime<Utc>,
}

impl Client {
    pub(crate) fn register(id: ClientId, details: NewClient) -> Self {
        Self {
            id,
            name: details.name.trim().to_string(),
            contact: details
                .contact
                .unwrap_or_else(|| DEFAULT_CONTACT.to_string()),
            phone: details.phone.unwrap_or_default(),
            email: details.email.unwrap_or_default(),
            registered_at: Utc::now(),
        }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.contact)
    }
}

/// Registration details for a new client
///
/// # Example
///
/// ```rust,ignore
/// let details = NewClient::new("Alice")
///     .phone("555-0100")
///     .email("alice@example.com");
/// let client = store.create_client(details)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = non_blank(contact.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    /// A client needs a name; everything else is optional
    pub fn validate(&self) -> Result<(), LodgingError> {
        if self.name.trim().is_empty() {
            return Err(LodgingError::validation("client name is required"));
        }
        Ok(())
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
