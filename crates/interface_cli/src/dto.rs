//! Response shapes written by the shell

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{Currency, Money, ReservationId};
use domain_lodging::ReportRow;

/// Label used for report rows whose client has been deleted
pub const UNKNOWN_CLIENT: &str = "Unknown client";

/// Checkout result
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub reservation_id: ReservationId,
    pub amount_due: Decimal,
    pub currency: Currency,
}

impl CheckoutResponse {
    pub fn new(reservation_id: ReservationId, amount_due: Money) -> Self {
        Self {
            reservation_id,
            amount_due: amount_due.amount(),
            currency: amount_due.currency(),
        }
    }
}

/// Outcome of a delete or check-in
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub id: String,
    pub ok: bool,
}

/// One report line, flattened for display
#[derive(Debug, Serialize)]
pub struct ReportLine {
    pub client_id: String,
    pub name: String,
    pub rooms: String,
    pub total_nights: i64,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub balance: Option<Decimal>,
    pub currency: Currency,
}

impl From<&ReportRow> for ReportLine {
    fn from(row: &ReportRow) -> Self {
        Self {
            client_id: row.client_id.to_string(),
            name: row
                .client_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
            rooms: row.rooms_display(),
            total_nights: row.total_nights,
            total_amount: row.total_amount.amount(),
            amount_paid: row.amount_paid.amount(),
            balance: row.balance().ok().map(|m| m.amount()),
            currency: row.total_amount.currency(),
        }
    }
}
