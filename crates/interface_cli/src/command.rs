//! Command parsing
//!
//! One command per line. Arguments are separated by whitespace; wrap an
//! argument in double quotes to keep spaces, e.g. `client "Ana Lopez"`.

use rust_decimal::Decimal;
use std::str::FromStr;

use core_kernel::{ClientId, ReservationId};
use domain_lodging::{ClientRef, NewClient, PaymentMethod};

use crate::error::CliError;

pub const HELP: &str = "\
client <name> [contact] [phone] [email]
delete-client <client-id>
reserve <client-name> <room> <check-in> <check-out>
reserve-for <client-id> <room> <check-in> <check-out>
delete-reservation <reservation-id>
checkin <reservation-id>
checkout <reservation-id>
pay <reservation-id> <method> <amount>
clients | reservations | payments | pending | active | report | help";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RegisterClient(NewClient),
    DeleteClient(ClientId),
    Reserve {
        client: ClientRef,
        room_number: String,
        check_in: String,
        check_out: String,
    },
    DeleteReservation(ReservationId),
    CheckIn(ReservationId),
    CheckOut(ReservationId),
    Pay {
        reservation_id: ReservationId,
        method: PaymentMethod,
        amount: Decimal,
    },
    ListClients,
    ListReservations,
    ListPayments,
    PendingCheckins,
    ActiveCheckins,
    Report,
    Help,
}

impl Command {
    /// Parses a line, returning `None` for blank lines and `#` comments
    pub fn parse(line: &str) -> Result<Option<Command>, CliError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let args = split_args(line)?;
        let (name, rest) = match args.split_first() {
            Some((name, rest)) => (name.as_str(), rest),
            None => return Ok(None),
        };

        let command = match (name, rest) {
            ("client", [name, extra @ ..]) if extra.len() <= 3 => {
                let mut details = NewClient::new(name.as_str());
                if let Some(contact) = extra.first() {
                    details = details.contact(contact.as_str());
                }
                if let Some(phone) = extra.get(1) {
                    details = details.phone(phone.as_str());
                }
                if let Some(email) = extra.get(2) {
                    details = details.email(email.as_str());
                }
                Command::RegisterClient(details)
            }
            ("client", _) => return Err(CliError::Usage("client <name> [contact] [phone] [email]")),

            ("delete-client", [id]) => Command::DeleteClient(ClientId::new(id.as_str())),
            ("delete-client", _) => return Err(CliError::Usage("delete-client <client-id>")),

            ("reserve", [client, room, check_in, check_out]) => Command::Reserve {
                client: ClientRef::by_name(client.as_str()),
                room_number: room.clone(),
                check_in: check_in.clone(),
                check_out: check_out.clone(),
            },
            ("reserve", _) => {
                return Err(CliError::Usage("reserve <client-name> <room> <check-in> <check-out>"))
            }

            ("reserve-for", [id, room, check_in, check_out]) => Command::Reserve {
                client: ClientRef::Id(ClientId::new(id.as_str())),
                room_number: room.clone(),
                check_in: check_in.clone(),
                check_out: check_out.clone(),
            },
            ("reserve-for", _) => {
                return Err(CliError::Usage("reserve-for <client-id> <room> <check-in> <check-out>"))
            }

            ("delete-reservation", [id]) => {
                Command::DeleteReservation(ReservationId::new(id.as_str()))
            }
            ("delete-reservation", _) => {
                return Err(CliError::Usage("delete-reservation <reservation-id>"))
            }

            ("checkin", [id]) => Command::CheckIn(ReservationId::new(id.as_str())),
            ("checkin", _) => return Err(CliError::Usage("checkin <reservation-id>")),

            ("checkout", [id]) => Command::CheckOut(ReservationId::new(id.as_str())),
            ("checkout", _) => return Err(CliError::Usage("checkout <reservation-id>")),

            ("pay", [id, method, amount]) => Command::Pay {
                reservation_id: ReservationId::new(id.as_str()),
                method: PaymentMethod::from(method.as_str()),
                amount: parse_amount(amount)?,
            },
            ("pay", _) => return Err(CliError::Usage("pay <reservation-id> <method> <amount>")),

            ("clients", []) => Command::ListClients,
            ("clients", _) => return Err(CliError::Usage("clients")),
            ("reservations", []) => Command::ListReservations,
            ("reservations", _) => return Err(CliError::Usage("reservations")),
            ("payments", []) => Command::ListPayments,
            ("payments", _) => return Err(CliError::Usage("payments")),
            ("pending", []) => Command::PendingCheckins,
            ("pending", _) => return Err(CliError::Usage("pending")),
            ("active", []) => Command::ActiveCheckins,
            ("active", _) => return Err(CliError::Usage("active")),
            ("report", []) => Command::Report,
            ("report", _) => return Err(CliError::Usage("report")),
            ("help", _) => Command::Help,

            (other, _) => return Err(CliError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, CliError> {
    let cleaned = raw.trim().trim_start_matches('$');
    Decimal::from_str(cleaned).map_err(|_| CliError::InvalidAmount(raw.to_string()))
}

/// Splits a line on whitespace, honouring double quotes
fn split_args(line: &str) -> Result<Vec<String>, CliError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CliError::UnterminatedQuote(line.to_string()));
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}
