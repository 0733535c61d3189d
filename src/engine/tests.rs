use super::AnalyticsEngine;

use anyhow::Result;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::engine::LoadError;

fn record_json(amount: &str, kind: &str, mode: &str, timestamp: &str, balance: &str) -> String {
    format!(
        r#"{{"amount":"{amount}","type":"{kind}","mode":"{mode}","transactionTimestamp":"{timestamp}","currentBalance":"{balance}","valueDate":"{timestamp}"}}"#
    )
}

fn create_temporary_statement(records: &[String]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    write!(file, r#"{{"Account":{{"Transactions":{{"Transaction":[{}]}}}}}}"#, records.join(","))?;

    Ok(file)
}

#[tokio::test]
async fn test_engine_analyzes_valid_statement() -> Result<()> {
    let file = create_temporary_statement(&[
        record_json("250", "DEBIT", "UPI", "2023-01-03T10:00:00+05:30", "9750"),
        record_json("10000", "CREDIT", "NEFT", "2023-01-01T08:00:00+05:30", "10000"),
        record_json("120", "DEBIT", "ATM", "2023-01-05T12:00:00+05:30", "9630"),
    ])?;

    let engine = AnalyticsEngine::new();
    let report = engine.run(file.path().to_str().unwrap()).await?;

    assert!(report.skipped.is_empty());
    assert_eq!(report.summary.total_count, 3);

    let balances: Vec<String> = report.summary.balance_series.iter().map(|point| point.balance.to_string()).collect();
    assert_eq!(balances, vec!["10000", "9750", "9630"]);

    assert_eq!(report.summary.type_distribution.get("DEBIT"), Some(&2));
    assert_eq!(report.summary.income_series.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_engine_skips_malformed_records_and_reports_them() -> Result<()> {
    let file = create_temporary_statement(&[
        record_json("250", "DEBIT", "UPI", "2023-01-01T10:00:00+05:30", "9750"),
        record_json("not a number", "DEBIT", "UPI", "2023-01-02T10:00:00+05:30", "9500"),
        record_json("120", "DEBIT", "ATM", "2023-01-03T10:00:00+05:30", "9380"),
    ])?;

    let engine = AnalyticsEngine::new();
    let report = engine.run(file.path().to_str().unwrap()).await?;

    assert_eq!(report.summary.total_count, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);
    assert!(report.skipped[0].reason.contains("amount"));

    Ok(())
}

#[tokio::test]
async fn test_engine_surfaces_missing_file_as_load_error() {
    let engine = AnalyticsEngine::new();

    let result = engine.run("missing_statement.json").await;

    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[tokio::test]
async fn test_engine_surfaces_invalid_json_as_load_error() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, "this is not a statement")?;

    let engine = AnalyticsEngine::new();
    let result = engine.run(file.path().to_str().unwrap()).await;

    assert!(matches!(result, Err(LoadError::MalformedDocument { .. })));

    Ok(())
}

#[tokio::test]
async fn test_engine_surfaces_missing_document_spine_as_load_error() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{"Account":{{}}}}"#)?;

    let engine = AnalyticsEngine::new();
    let result = engine.run(file.path().to_str().unwrap()).await;

    assert!(matches!(result, Err(LoadError::MalformedDocument { .. })));

    Ok(())
}

#[tokio::test]
async fn test_engine_handles_empty_transaction_array() -> Result<()> {
    let file = create_temporary_statement(&[])?;

    let engine = AnalyticsEngine::new();
    let report = engine.run(file.path().to_str().unwrap()).await?;

    assert_eq!(report.summary.total_count, 0);
    assert!(report.summary.amount_stats.is_none());
    assert!(report.summary.significant_changes.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_engine_builders_override_analysis_policy() -> Result<()> {
    let file = create_temporary_statement(&[
        record_json("50", "DEBIT", "UPI", "2023-01-01T10:00:00+05:30", "950"),
        record_json("150", "DEBIT", "UPI", "2023-01-02T10:00:00+05:30", "800"),
    ])?;

    let engine = AnalyticsEngine::new()
        .with_small_threshold(Decimal::from(100))
        .with_sigma_multiplier(Decimal::from(3));

    let report = engine.run(file.path().to_str().unwrap()).await?;

    assert_eq!(report.summary.size_distribution.small, 1);
    assert_eq!(report.summary.size_distribution.large, 1);

    Ok(())
}
