//! Lodging Ledger - Command Shell Binary
//!
//! Reads ledger commands from stdin, one per line, and prints one JSON
//! result per line on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Interactive
//! cargo run --bin lodging-ledger
//!
//! # Scripted, with a custom nightly rate
//! LODGING_RATE_PER_NIGHT=120 cargo run --bin lodging-ledger < bookings.txt
//! ```
//!
//! # Environment Variables
//!
//! * `LODGING_RATE_PER_NIGHT` - Amount charged per night (default: 100)
//! * `LODGING_CURRENCY` - Ledger currency code (default: USD)
//! * `LODGING_ID_DIGITS` - Width of numeric identifiers (default: 5)
//! * `LODGING_ID_UUID` - Use UUID identifiers instead (default: false)
//! * `LODGING_ID_SEED` - Seed for reproducible identifiers
//! * `LODGING_MAX_ID_ATTEMPTS` - Identifier draws before giving up (default: 32)
//! * `LODGING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use domain_lodging::{LedgerStore, SharedLedger};
use interface_cli::{config::CliConfig, shell};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let (config, config_error) = CliConfig::load();

    init_tracing(&config.log_level);

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Invalid LODGING_* configuration, using defaults");
    }

    let store = LedgerStore::new(config.ledger_config())?;
    let ledger = SharedLedger::new(store);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let summary = shell::run(&ledger, stdin, stdout).await?;

    tracing::info!(
        executed = summary.executed,
        failed = summary.failed,
        "Shell finished"
    );
    Ok(())
}

/// Initializes the tracing subscriber for structured logging on stderr.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
