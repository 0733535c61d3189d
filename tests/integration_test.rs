use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};
use serde_json::Value;

fn run_binary_on(sample: &str) -> Result<Value> {
    let binary_path = env!("CARGO_BIN_EXE_statement-analytics-engine");
    let sample_path = Path::new("samples").join(sample);

    let output = Command::new(binary_path)
        .arg(sample_path)
        .output()?;

    if !output.status.success() {
        return Err(anyhow!("binary exited with {:?}", output.status.code()));
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_cli_analyzes_sample_statement() -> Result<()> {
    let report = run_binary_on("sample.json")?;

    let summary = report.get("summary").ok_or_else(|| anyhow!("summary missing from report"))?;

    assert_eq!(summary["total_count"], 8);
    assert_eq!(summary["size_distribution"]["small"], 4);
    assert_eq!(summary["size_distribution"]["large"], 4);
    assert_eq!(summary["type_distribution"]["DEBIT"], 6);
    assert_eq!(summary["type_distribution"]["CREDIT"], 2);

    let balance_series = summary["balance_series"].as_array().ok_or_else(|| anyhow!("balance series missing"))?;
    assert_eq!(balance_series.len(), 8);
    assert_eq!(balance_series[0]["balance"], "10000");
    assert_eq!(balance_series[7]["balance"], "11500");

    let changes = summary["significant_changes"].as_array().ok_or_else(|| anyhow!("significant changes missing"))?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["series_index"], 4);
    assert_eq!(changes[0]["balance"], "12630");
    assert_eq!(changes[0]["delta"], "5000");

    assert_eq!(summary["debit_categories"]["UPI"]["total_amount"], "450");
    assert_eq!(summary["debit_categories"]["UPI"]["frequency"], 3);

    let income_series = summary["income_series"].as_array().ok_or_else(|| anyhow!("income series missing"))?;
    assert_eq!(income_series.len(), 2);
    assert_eq!(income_series[0]["amount"], "10000");
    assert_eq!(income_series[1]["amount"], "5000");

    let skipped = report["skipped"].as_array().ok_or_else(|| anyhow!("skipped diagnostics missing"))?;
    assert!(skipped.is_empty());

    Ok(())
}

#[test]
fn test_cli_reports_skipped_records_for_malformed_statement() -> Result<()> {
    let report = run_binary_on("malformed.json")?;

    assert_eq!(report["summary"]["total_count"], 2);

    let skipped = report["skipped"].as_array().ok_or_else(|| anyhow!("skipped diagnostics missing"))?;
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["index"], 1);

    Ok(())
}

#[test]
fn test_cli_requires_an_input_path() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_statement-analytics-engine");

    let output = Command::new(binary_path).output()?;

    assert!(!output.status.success());

    Ok(())
}
