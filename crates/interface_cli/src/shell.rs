//! Line-oriented shell over a shared ledger
//!
//! Each input line is one command. Results are written back as one JSON
//! document per line; failures become an [`ErrorResponse`] line and the shell
//! carries on with the next command.

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use domain_lodging::SharedLedger;

use crate::command::{Command, HELP};
use crate::dto::{AckResponse, CheckoutResponse, ReportLine};
use crate::error::{CliError, ErrorResponse};

/// Counts of commands handled by [`run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Executes one command against the ledger
pub async fn execute(ledger: &SharedLedger, command: Command) -> Result<Value, CliError> {
    let value = match command {
        Command::RegisterClient(details) => {
            serde_json::to_value(ledger.create_client(details).await?)?
        }
        Command::DeleteClient(id) => {
            let ok = ledger.delete_client(&id).await;
            serde_json::to_value(AckResponse { id: id.to_string(), ok })?
        }
        Command::Reserve {
            client,
            room_number,
            check_in,
            check_out,
        } => {
            let reservation = ledger
                .create_reservation(client, &room_number, &check_in, &check_out)
                .await?;
            serde_json::to_value(reservation)?
        }
        Command::DeleteReservation(id) => {
            let ok = ledger.delete_reservation(&id).await;
            serde_json::to_value(AckResponse { id: id.to_string(), ok })?
        }
        Command::CheckIn(id) => {
            ledger.checkin(&id).await?;
            serde_json::to_value(AckResponse { id: id.to_string(), ok: true })?
        }
        Command::CheckOut(id) => {
            let amount_due = ledger.checkout(&id).await?;
            serde_json::to_value(CheckoutResponse::new(id, amount_due))?
        }
        Command::Pay {
            reservation_id,
            method,
            amount,
        } => {
            let payment = ledger
                .process_payment(&reservation_id, method, amount)
                .await?;
            serde_json::to_value(payment)?
        }
        Command::ListClients => serde_json::to_value(ledger.clients().await)?,
        Command::ListReservations => serde_json::to_value(ledger.reservations().await)?,
        Command::ListPayments => serde_json::to_value(ledger.payments().await)?,
        Command::PendingCheckins => serde_json::to_value(ledger.pending_checkins().await)?,
        Command::ActiveCheckins => serde_json::to_value(ledger.active_checkins().await)?,
        Command::Report => {
            let lines: Vec<ReportLine> = ledger.report().await.iter().map(ReportLine::from).collect();
            serde_json::to_value(lines)?
        }
        Command::Help => json!({ "commands": HELP.lines().collect::<Vec<_>>() }),
    };
    Ok(value)
}

/// Strips the line terminator and checks the encoding
fn decode_line(raw: &[u8], line_number: usize) -> Result<&str, CliError> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw).map_err(|_| CliError::InvalidEncoding(line_number))
}

/// Reads commands until end of input, writing one JSON line per command
///
/// # Errors
///
/// Only I/O failures on the reader or writer end the run early. A line that
/// is not valid UTF-8 is reported like any other bad command.
pub async fn run<R, W>(
    ledger: &SharedLedger,
    mut reader: R,
    mut writer: W,
) -> Result<RunSummary, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = RunSummary::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_number += 1;

        let outcome = match decode_line(&buf, line_number) {
            Err(err) => Err(err),
            Ok(line) => match Command::parse(line) {
                Ok(None) => continue,
                Ok(Some(command)) => {
                    debug!(?command, "executing command");
                    execute(ledger, command).await
                }
                Err(err) => Err(err),
            },
        };

        summary.executed += 1;
        let rendered = match outcome {
            Ok(value) => serde_json::to_string(&value)?,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                summary.failed += 1;
                warn!(error = %err, kind = err.kind(), "command failed");
                serde_json::to_string(&ErrorResponse::from(&err))?
            }
        };

        writer.write_all(rendered.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    info!(executed = summary.executed, failed = summary.failed, "input finished");
    Ok(summary)
}
