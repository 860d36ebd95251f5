//! Room reservations and their stay lifecycle
//!
//! ```text
//! Booked -> CheckedIn -> CheckedOut
//! ```
//!
//! Transitions only move forward. A reservation can be deleted from the
//! ledger in any state, but never returns to an earlier one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClientId, ReservationId};
use crate::error::LodgingError;

/// Calendar date format accepted for check-in and check-out
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Reserved, guest has not arrived
    Booked,
    /// Guest is staying
    CheckedIn,
    /// Stay finished and billed
    CheckedOut,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReservationStatus::Booked => "booked",
            ReservationStatus::CheckedIn => "checked in",
            ReservationStatus::CheckedOut => "checked out",
        };
        f.write_str(label)
    }
}

/// A lifecycle action applied at the front desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StayAction {
    CheckIn,
    CheckOut,
}

impl StayAction {
    /// State the action must start from
    fn required_state(&self) -> ReservationStatus {
        match self {
            StayAction::CheckIn => ReservationStatus::Booked,
            StayAction::CheckOut => ReservationStatus::CheckedIn,
        }
    }

    fn target_state(&self) -> ReservationStatus {
        match self {
            StayAction::CheckIn => ReservationStatus::CheckedIn,
            StayAction::CheckOut => ReservationStatus::CheckedOut,
        }
    }
}

impl fmt::Display for StayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StayAction::CheckIn => f.write_str("check in"),
            StayAction::CheckOut => f.write_str("check out"),
        }
    }
}

/// A room reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier
    pub id: ReservationId,
    /// Guest the room is booked for; the client may since have been deleted
    pub client_id: ClientId,
    /// Room number as printed on the door
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    status: ReservationStatus,
    /// When the reservation was made
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Creates a booked reservation
    ///
    /// # Errors
    ///
    /// - `Validation` if the room number is blank
    /// - `InvalidStayPeriod` unless check-out falls after check-in
    pub fn book(
        id: ReservationId,
        client_id: ClientId,
        room_number: &str,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
    ) -> Result<Self, LodgingError> {
        let room_number = validate_stay(room_number, check_in_date, check_out_date)?;

        Ok(Self {
            id,
            client_id,
            room_number,
            check_in_date,
            check_out_date,
            status: ReservationStatus::Booked,
            created_at: Utc::now(),
            checked_in_at: None,
            checked_out_at: None,
        })
    }

    /// Number of nights between check-in and check-out
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    /// True once the guest has arrived, including after checkout
    pub fn checked_in(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::CheckedIn | ReservationStatus::CheckedOut
        )
    }

    pub fn checked_out(&self) -> bool {
        self.status == ReservationStatus::CheckedOut
    }

    /// Checks whether the action is allowed from the current state
    pub fn can_apply(&self, action: StayAction) -> bool {
        self.status == action.required_state()
    }

    /// Error describing why `action` is refused in the current state
    pub fn rejection(&self, action: StayAction) -> LodgingError {
        LodgingError::InvalidStateTransition {
            reservation: self.id.to_string(),
            from: self.status.to_string(),
            action: action.to_string(),
        }
    }

    /// Moves the reservation forward
    pub(crate) fn apply(&mut self, action: StayAction) -> Result<(), LodgingError> {
        if !self.can_apply(action) {
            return Err(self.rejection(action));
        }

        let now = Utc::now();
        match action {
            StayAction::CheckIn => self.checked_in_at = Some(now),
            StayAction::CheckOut => self.checked_out_at = Some(now),
        }
        self.status = action.target_state();
        Ok(())
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation {} for client {} in Room {} from {} to {}.",
            self.id, self.client_id, self.room_number, self.check_in_date, self.check_out_date
        )
    }
}

/// Parses a `YYYY-MM-DD` stay date supplied by a caller
pub fn parse_stay_date(field: &'static str, value: &str) -> Result<NaiveDate, LodgingError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LodgingError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Checks booking input and returns the normalized room number
pub(crate) fn validate_stay(
    room_number: &str,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
) -> Result<String, LodgingError> {
    let room_number = room_number.trim();
    if room_number.is_empty() {
        return Err(LodgingError::validation("room number is required"));
    }
    if check_out_date <= check_in_date {
        return Err(LodgingError::InvalidStayPeriod {
            check_in: check_in_date.to_string(),
            check_out: check_out_date.to_string(),
        });
    }
    Ok(room_number.to_string())
}
