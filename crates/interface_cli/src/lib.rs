//! Command Shell
//!
//! A thin caller of the lodging ledger: it parses one command per line,
//! runs it against a single injected [`SharedLedger`](domain_lodging::SharedLedger)
//! and writes JSON results back.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_lodging::{LedgerStore, SharedLedger};
//! use interface_cli::shell;
//!
//! let ledger = SharedLedger::new(LedgerStore::new(config.ledger_config())?);
//! shell::run(&ledger, stdin, stdout).await?;
//! ```

pub mod config;
pub mod error;
pub mod command;
pub mod dto;
pub mod shell;

pub use command::Command;
pub use config::CliConfig;
pub use error::CliError;
pub use shell::{execute, run, RunSummary};
