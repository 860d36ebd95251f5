//! Tests for the command shell

use serde_json::Value;

use domain_lodging::{LedgerConfig, LedgerStore, SharedLedger};
use interface_cli::{execute, run, Command, RunSummary};

fn create_test_ledger() -> SharedLedger {
    SharedLedger::new(LedgerStore::new(LedgerConfig::default().with_seed(99)).unwrap())
}

async fn exec(ledger: &SharedLedger, line: &str) -> Value {
    let command = Command::parse(line).unwrap().unwrap();
    execute(ledger, command).await.unwrap()
}

async fn run_script(ledger: &SharedLedger, script: &str) -> (RunSummary, Vec<Value>) {
    run_bytes(ledger, script.as_bytes()).await
}

async fn run_bytes(ledger: &SharedLedger, input: &[u8]) -> (RunSummary, Vec<Value>) {
    let mut output = Vec::new();
    let summary = run(ledger, input, &mut output).await.unwrap();
    let lines = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (summary, lines)
}

mod execute_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_stay_through_commands() {
        let ledger = create_test_ledger();

        let client = exec(&ledger, "client Alice").await;
        assert_eq!(client["name"], "Alice");

        let reservation = exec(&ledger, "reserve Alice 101 2024-01-01 2024-01-04").await;
        let id = reservation["id"].as_str().unwrap().to_string();
        assert_eq!(reservation["client_id"], client["id"]);

        let checkin = exec(&ledger, &format!("checkin {}", id)).await;
        assert_eq!(checkin["ok"], true);

        let checkout = exec(&ledger, &format!("checkout {}", id)).await;
        assert_eq!(checkout["amount_due"], "300");
        assert_eq!(checkout["currency"], "USD");

        let payment = exec(&ledger, &format!("pay {} cash 300", id)).await;
        assert_eq!(payment["reservation_id"], id.as_str());

        let report = exec(&ledger, "report").await;
        let rows = report.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[0]["rooms"], "101");
        assert_eq!(rows[0]["total_nights"], 3);
        assert_eq!(rows[0]["total_amount"], "300");
        assert_eq!(rows[0]["amount_paid"], "300");
        assert_eq!(rows[0]["balance"], "0");
    }

    #[tokio::test]
    async fn test_reserve_for_client_id() {
        let ledger = create_test_ledger();
        let client = exec(&ledger, r#"client "Ana Lopez" desk"#).await;
        let client_id = client["id"].as_str().unwrap();

        let reservation =
            exec(&ledger, &format!("reserve-for {} 7 2024-05-01 2024-05-02", client_id)).await;
        assert_eq!(reservation["client_id"], client_id);

        let pending = exec(&ledger, "pending").await;
        assert_eq!(pending.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deleted_client_reported_as_unknown() {
        let ledger = create_test_ledger();
        let reservation = exec(&ledger, "reserve Bob 201 2024-01-01 2024-01-02").await;
        let id = reservation["id"].as_str().unwrap().to_string();
        let client_id = reservation["client_id"].as_str().unwrap().to_string();
        exec(&ledger, &format!("checkin {}", id)).await;
        exec(&ledger, &format!("checkout {}", id)).await;

        let deleted = exec(&ledger, &format!("delete-client {}", client_id)).await;
        assert_eq!(deleted["ok"], true);

        let report = exec(&ledger, "report").await;
        assert_eq!(report[0]["name"], "Unknown client");
    }
}

mod run_tests {
    use super::*;

    #[tokio::test]
    async fn test_failures_reported_and_run_continues() {
        let ledger = create_test_ledger();
        let script = "\
# bookings
client Alice

reserve Alice 101 2024-01-04 2024-01-01
checkout 00000
frobnicate
clients
";
        let (summary, lines) = run_script(&ledger, script).await;

        assert_eq!(summary, RunSummary { executed: 5, failed: 3 });
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0]["name"], "Alice");
        assert_eq!(lines[1]["error"], "validation_error");
        assert_eq!(lines[2]["error"], "not_found");
        assert_eq!(lines[3]["error"], "bad_command");
        assert_eq!(lines[4].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ambiguous_name_is_conflict() {
        let ledger = create_test_ledger();
        let script = "client Alice\nclient Alice\nreserve Alice 101 2024-01-01 2024-01-02\n";
        let (summary, lines) = run_script(&ledger, script).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(lines[2]["error"], "conflict");
        assert!(lines[2]["message"].as_str().unwrap().contains("ambiguous"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let ledger = create_test_ledger();
        let input = b"client Alice\nclient Jos\xe9\r\nclient Bob\nclients\n";
        let (summary, lines) = run_bytes(&ledger, input).await;

        assert_eq!(summary, RunSummary { executed: 4, failed: 1 });
        assert_eq!(lines[0]["name"], "Alice");
        assert_eq!(lines[1]["error"], "bad_command");
        assert_eq!(lines[1]["message"], "Line 2 is not valid UTF-8");
        assert_eq!(lines[2]["name"], "Bob");
        assert_eq!(lines[3].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_crlf_and_missing_final_newline() {
        let ledger = create_test_ledger();
        let (summary, lines) = run_script(&ledger, "client Alice\r\nclients").await;

        assert_eq!(summary, RunSummary { executed: 2, failed: 0 });
        assert_eq!(lines[0]["name"], "Alice");
        assert_eq!(lines[1][0]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_listing_with_arguments_reports_usage() {
        let ledger = create_test_ledger();
        let (summary, lines) = run_script(&ledger, "report now\nreport\n").await;

        assert_eq!(summary.failed, 1);
        assert_eq!(lines[0]["error"], "bad_command");
        assert_eq!(lines[0]["message"], "Usage: report");
        assert!(lines[1].is_array());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let ledger = create_test_ledger();
        let (summary, lines) = run_script(&ledger, "").await;
        assert_eq!(summary, RunSummary::default());
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_empty_report() {
        let ledger = create_test_ledger();
        let (_, lines) = run_script(&ledger, "report\n").await;
        assert_eq!(lines[0], Value::Array(Vec::new()));
    }
}
