//! Per-client billing report
//!
//! The report only looks at finished stays. For every client with at least
//! one checked-out reservation it gathers the distinct rooms used, total
//! nights, the amount billed at the given nightly rate and the payments
//! received against those reservations.
//!
//! References are resolved defensively: a deleted client still gets a row
//! (without a name), and payments whose reservation is gone are skipped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

use core_kernel::{ClientId, Currency, Money, MoneyError};
use crate::billing;
use crate::ledger::LedgerStore;

/// One client's aggregate over checked-out reservations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub client_id: ClientId,
    /// `None` if the client has been deleted since booking
    pub client_name: Option<String>,
    /// Distinct room numbers used
    pub rooms: BTreeSet<String>,
    pub total_nights: i64,
    /// Sum of `nights × rate_per_night` over the client's stays
    pub total_amount: Money,
    /// Payments received against the client's checked-out reservations
    pub amount_paid: Money,
}

impl ReportRow {
    fn new(client_id: ClientId, client_name: Option<String>, currency: Currency) -> Self {
        Self {
            client_id,
            client_name,
            rooms: BTreeSet::new(),
            total_nights: 0,
            total_amount: Money::zero(currency),
            amount_paid: Money::zero(currency),
        }
    }

    /// Rooms joined with commas, e.g. `"101, 102"`
    pub fn rooms_display(&self) -> String {
        self.rooms
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Billed minus paid; negative when the client has overpaid
    pub fn balance(&self) -> Result<Money, MoneyError> {
        self.total_amount.checked_sub(&self.amount_paid)
    }
}

/// Builds the billing report from the store's current state
///
/// Rows appear in the order each client's first checked-out reservation was
/// booked. An empty ledger gives an empty report.
pub fn generate_report(store: &LedgerStore, rate_per_night: Decimal) -> Vec<ReportRow> {
    let currency = store.config().currency;
    let rate = Money::new(rate_per_night, currency);

    let mut rows: Vec<ReportRow> = Vec::new();
    let mut row_for_client: HashMap<ClientId, usize> = HashMap::new();

    for reservation in store.list_reservations() {
        if !reservation.checked_out() {
            continue;
        }

        let slot = *row_for_client
            .entry(reservation.client_id.clone())
            .or_insert_with(|| {
                let name = store.client_of(reservation).map(|c| c.name.clone());
                rows.push(ReportRow::new(reservation.client_id.clone(), name, currency));
                rows.len() - 1
            });
        let row = &mut rows[slot];

        row.rooms.insert(reservation.room_number.clone());
        row.total_nights += reservation.nights();

        let charge = billing::reservation_charge(reservation, rate);
        accumulate(&mut row.total_amount, charge, "total_amount", &row.client_id);
    }

    for payment in store.list_payments() {
        let Some(reservation) = store.reservation(&payment.reservation_id) else {
            debug!(payment_id = %payment.id, "payment for deleted reservation left out of report");
            continue;
        };
        if !reservation.checked_out() {
            continue;
        }
        // Rows exist for every checked-out reservation's client, so a miss
        // here means the ledger changed mid-report and the payment is dropped.
        let Some(&slot) = row_for_client.get(&reservation.client_id) else {
            continue;
        };
        let row = &mut rows[slot];
        accumulate(&mut row.amount_paid, Ok(payment.amount), "amount_paid", &row.client_id);
    }

    rows
}

fn accumulate(
    total: &mut Money,
    amount: Result<Money, MoneyError>,
    column: &'static str,
    client_id: &ClientId,
) {
    match amount.and_then(|amount| total.checked_add(&amount)) {
        Ok(sum) => *total = sum,
        Err(err) => {
            warn!(client_id = %client_id, column, error = %err, "report amount skipped");
        }
    }
}
