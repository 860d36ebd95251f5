//! Tests for loading shell configuration from `LODGING_*` variables
//!
//! Everything lives in one test: the process environment is shared between
//! test threads.

use rust_decimal_macros::dec;

use core_kernel::{Currency, IdSpace};
use interface_cli::CliConfig;

const VARS: [&str; 5] = [
    "LODGING_RATE_PER_NIGHT",
    "LODGING_CURRENCY",
    "LODGING_ID_DIGITS",
    "LODGING_ID_SEED",
    "LODGING_LOG_LEVEL",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_environment_loading() {
    clear_env();

    // unset variables keep their defaults
    let (config, error) = CliConfig::load();
    assert!(error.is_none());
    assert_eq!(config.rate_per_night, dec!(100));
    assert_eq!(config.ledger_config().id_space, IdSpace::Numeric { digits: 5 });

    std::env::set_var("LODGING_RATE_PER_NIGHT", "120");
    std::env::set_var("LODGING_CURRENCY", "EUR");
    std::env::set_var("LODGING_ID_DIGITS", "6");
    std::env::set_var("LODGING_ID_SEED", "42");
    std::env::set_var("LODGING_LOG_LEVEL", "debug");

    let config = CliConfig::from_env().unwrap();
    assert_eq!(config.rate_per_night, dec!(120));
    assert_eq!(config.currency, Currency::EUR);
    assert_eq!(config.id_seed, Some(42));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.ledger_config().id_space, IdSpace::Numeric { digits: 6 });

    std::env::set_var("LODGING_RATE_PER_NIGHT", "85.5");
    let config = CliConfig::from_env().unwrap();
    assert_eq!(config.rate_per_night, dec!(85.5));
    assert_eq!(config.ledger_config().rate().amount(), dec!(85.5));

    // an unparsable value falls back to the full default configuration
    std::env::set_var("LODGING_ID_DIGITS", "wide");
    assert!(CliConfig::from_env().is_err());
    let (config, error) = CliConfig::load();
    assert!(error.is_some());
    assert_eq!(config.rate_per_night, dec!(100));
    assert_eq!(config.currency, Currency::USD);
    assert_eq!(config.log_level, "info");

    clear_env();
}
