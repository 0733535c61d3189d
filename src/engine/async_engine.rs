use crate::analytics::{parse_transactions, summarize, AnalysisReport, SummaryConfig};
use crate::engine::errors::LoadError;
use crate::models::RawRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error};

/// Outer spine of the statement export: `Account.Transactions.Transaction`.
#[derive(Debug, Deserialize)]
struct StatementDocument {
    #[serde(rename = "Account")]
    account: AccountSection
}

#[derive(Debug, Deserialize)]
struct AccountSection {
    #[serde(rename = "Transactions")]
    transactions: TransactionsSection
}

#[derive(Debug, Deserialize)]
struct TransactionsSection {
    #[serde(rename = "Transaction")]
    transaction: Vec<RawRecord>
}

/// End-to-end statement analysis engine.
///
/// Decodes the statement document on a blocking task, streams its raw records
/// through a bounded channel, then validates and reduces them to an
/// `AnalysisReport`. Load failures (unreadable file, malformed document)
/// surface as `LoadError`; invalid individual records are skipped and
/// reported, never fatal.
pub struct AnalyticsEngine {
    config: SummaryConfig,
    backpressure: usize
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self {
            config: SummaryConfig::default(),
            backpressure: 256
        }
    }

    /// Amounts strictly below this threshold classify as small.
    pub fn with_small_threshold(mut self, threshold: Decimal) -> Self {
        self.config.small_threshold = threshold;
        self
    }

    /// Balance deltas beyond `mean + multiplier * stddev` are flagged.
    pub fn with_sigma_multiplier(mut self, multiplier: Decimal) -> Self {
        self.config.sigma_multiplier = multiplier;
        self
    }

    /// Orchestrates the end-to-end analysis pipeline for a statement file.
    pub async fn run(&self, path: &str) -> Result<AnalysisReport, LoadError> {
        let (sender, receiver) = mpsc::channel::<RawRecord>(self.backpressure);
        let reader_handle = self.spawn_statement_reader(path.to_string(), sender);
        let records = collect_records(receiver).await;

        match reader_handle.await {
            Ok(Ok(())) => {}
            Ok(Err(load_error)) => return Err(load_error),
            Err(join_error) => {
                error!("Statement ingestion task failed: {join_error}");
                return Err(LoadError::IngestionFailed);
            }
        }

        debug!("Streamed {} raw records from [{path}]", records.len());

        let (transactions, skipped) = parse_transactions(&records);
        let summary = summarize(&transactions, &self.config);

        Ok(AnalysisReport { summary, skipped })
    }

    fn spawn_statement_reader(&self, path: String, sender: mpsc::Sender<RawRecord>) -> JoinHandle<Result<(), LoadError>> {
        spawn_blocking(move || {
            let file = File::open(&path).map_err(|io_error| {
                error!("Error opening statement at path: {path} | {io_error}");
                LoadError::io(&path, io_error)
            })?;

            let document: StatementDocument = serde_json::from_reader(BufReader::new(file)).map_err(|decode_error| {
                error!("Error decoding statement at path: {path} | {decode_error}");
                LoadError::malformed_document(&path, decode_error)
            })?;

            for record in document.account.transactions.transaction {
                if sender.blocking_send(record).is_err() {
                    break;
                }
            }

            Ok(())
        })
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

async fn collect_records(mut receiver: mpsc::Receiver<RawRecord>) -> Vec<RawRecord> {
    let mut records = Vec::new();

    while let Some(record) = receiver.recv().await {
        records.push(record);
    }

    records
}
