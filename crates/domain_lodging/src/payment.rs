//! Payment recording
//!
//! Payments are recorded against a reservation in any lifecycle state, so a
//! deposit taken at booking counts the same as a payment at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use core_kernel::{Money, PaymentId, ReservationId};

/// How a payment was tendered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    /// Any other tag the front desk uses
    Other(String),
}

impl FromStr for PaymentMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let normalized = tag.to_ascii_lowercase().replace(['-', ' '], "_");
        Ok(match normalized.as_str() {
            "cash" => PaymentMethod::Cash,
            "credit" | "credit_card" => PaymentMethod::CreditCard,
            "debit" | "debit_card" => PaymentMethod::DebitCard,
            "transfer" | "bank_transfer" => PaymentMethod::BankTransfer,
            _ => PaymentMethod::Other(tag.to_string()),
        })
    }
}

impl From<&str> for PaymentMethod {
    fn from(tag: &str) -> Self {
        match tag.parse() {
            Ok(method) => method,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("Cash"),
            PaymentMethod::CreditCard => f.write_str("Credit Card"),
            PaymentMethod::DebitCard => f.write_str("Debit Card"),
            PaymentMethod::BankTransfer => f.write_str("Bank Transfer"),
            PaymentMethod::Other(tag) => f.write_str(tag),
        }
    }
}

/// A payment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Reservation being paid; it may since have been deleted
    pub reservation_id: ReservationId,
    pub method: PaymentMethod,
    /// Amount received, never negative
    pub amount: Money,
    /// When the payment was recorded
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    pub(crate) fn record(
        id: PaymentId,
        reservation_id: ReservationId,
        method: PaymentMethod,
        amount: Money,
    ) -> Self {
        Self {
            id,
            reservation_id,
            method,
            amount,
            paid_at: Utc::now(),
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Payment {}: Reservation {}, Method: {}, Amount: {} on {}",
            self.id,
            self.reservation_id,
            self.method,
            self.amount,
            self.paid_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_method_parsing() {
        assert_eq!(PaymentMethod::from("cash"), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::from("Credit Card"), PaymentMethod::CreditCard);
        assert_eq!(PaymentMethod::from("debit-card"), PaymentMethod::DebitCard);
        assert_eq!(PaymentMethod::from("bank_transfer"), PaymentMethod::BankTransfer);
        assert_eq!(
            PaymentMethod::from(" voucher "),
            PaymentMethod::Other("voucher".to_string())
        );
    }

    #[test]
    fn test_display() {
        let payment = Payment::record(
            PaymentId::new("30001"),
            ReservationId::new("20001"),
            PaymentMethod::Cash,
            Money::new(dec!(300), Currency::USD),
        );
        let text = payment.to_string();
        assert!(text.starts_with("Payment 30001: Reservation 20001, Method: Cash, Amount: $300.00 on "));
    }
}
