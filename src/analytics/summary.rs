use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::analytics::stats::{mean, sample_std_dev, DescriptiveStats};
use crate::models::{RawRecord, RecordError, Transaction, TransactionKind};
use crate::types::{RecordIndex, Timestamp};

/// Tunable policy for the summary computation.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Amounts strictly below this classify as small.
    pub small_threshold: Decimal,
    /// Balance deltas beyond `mean + multiplier * stddev` are flagged.
    pub sigma_multiplier: Decimal
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            small_threshold: Decimal::from(500),
            sigma_multiplier: Decimal::from(2)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SizeDistribution {
    pub small: usize,
    pub large: usize
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalancePoint {
    pub timestamp: Timestamp,
    pub balance: Decimal
}

/// A balance transition whose delta cleared the outlier cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignificantChange {
    /// Position in the sorted balance series. Never zero since the first
    /// point has no predecessor and therefore no delta.
    pub series_index: usize,
    pub timestamp: Timestamp,
    pub balance: Decimal,
    pub delta: Decimal
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub total_amount: Decimal,
    pub frequency: usize
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncomePoint {
    pub timestamp: Timestamp,
    pub amount: Decimal
}

/// Immutable snapshot of every metric derived from one statement load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_count: usize,
    /// `None` only for the empty statement, where the stats are undefined.
    pub amount_stats: Option<DescriptiveStats>,
    pub size_distribution: SizeDistribution,
    pub type_distribution: BTreeMap<String, usize>,
    pub balance_series: Vec<BalancePoint>,
    pub significant_changes: Vec<SignificantChange>,
    pub debit_categories: BTreeMap<String, CategoryBreakdown>,
    pub income_series: Vec<IncomePoint>
}

/// Diagnostic for a record dropped by the skip-and-warn policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub index: RecordIndex,
    pub reason: String
}

impl From<RecordError> for SkippedRecord {
    fn from(error: RecordError) -> Self {
        Self {
            index: error.index(),
            reason: error.to_string()
        }
    }
}

/// Full result of one statement analysis: the summary plus the records the
/// validation pass had to drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: AnalyticsSummary,
    pub skipped: Vec<SkippedRecord>
}

/// Validates raw records in order, dropping invalid ones with a warning.
///
/// The skip policy is uniform: a record missing a required field or carrying
/// a malformed numeric/timestamp value is excluded from every metric, logged,
/// and reported in the returned diagnostics. Valid records keep their source
/// order and original indices.
pub fn parse_transactions(records: &[RawRecord]) -> (Vec<Transaction>, Vec<SkippedRecord>) {
    let mut transactions = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match Transaction::from_raw(index, record) {
            Ok(transaction) => transactions.push(transaction),
            Err(error) => {
                warn!("{error}");
                skipped.push(SkippedRecord::from(error));
            }
        }
    }

    (transactions, skipped)
}

/// Reduces validated transactions to the analytics summary.
///
/// Pure and deterministic: the same transactions and config always produce an
/// identical summary. Every series is ordered by timestamp ascending with
/// input order breaking ties, and all arithmetic is exact decimal, so repeated
/// runs reproduce the output bit for bit.
pub fn summarize(transactions: &[Transaction], config: &SummaryConfig) -> AnalyticsSummary {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|transaction| transaction.timestamp);

    let amounts: Vec<Decimal> = sorted.iter().map(|transaction| transaction.amount).collect();

    let mut size_distribution = SizeDistribution::default();
    let mut type_distribution = BTreeMap::new();

    for transaction in &sorted {
        if transaction.amount < config.small_threshold {
            size_distribution.small += 1;
        } else {
            size_distribution.large += 1;
        }

        *type_distribution.entry(transaction.kind.label().to_string()).or_insert(0) += 1;
    }

    let balance_series: Vec<BalancePoint> = sorted.iter()
        .map(|transaction| BalancePoint {
            timestamp: transaction.timestamp,
            balance: transaction.balance
        })
        .collect();

    let significant_changes = flag_significant_changes(&balance_series, config.sigma_multiplier);

    let mut debit_categories: BTreeMap<String, CategoryBreakdown> = BTreeMap::new();

    for transaction in &sorted {
        if transaction.kind != TransactionKind::Debit {
            continue;
        }

        let entry = debit_categories.entry(transaction.mode.clone()).or_default();
        entry.total_amount += transaction.amount;
        entry.frequency += 1;
    }

    let income_series = sorted.iter()
        .filter(|transaction| transaction.kind == TransactionKind::Credit)
        .map(|transaction| IncomePoint {
            timestamp: transaction.timestamp,
            amount: transaction.amount
        })
        .collect();

    AnalyticsSummary {
        total_count: sorted.len(),
        amount_stats: DescriptiveStats::from_values(&amounts),
        size_distribution,
        type_distribution,
        balance_series,
        significant_changes,
        debit_categories,
        income_series
    }
}

/// Flags balance transitions whose absolute delta strictly exceeds
/// `mean(deltas) + sigma_multiplier * stddev(deltas)`.
///
/// The first point of the series has no delta and is excluded from the delta
/// statistics rather than counted as zero. Below two deltas the cutoff is
/// undefined and nothing qualifies.
fn flag_significant_changes(series: &[BalancePoint], sigma_multiplier: Decimal) -> Vec<SignificantChange> {
    let deltas: Vec<Decimal> = series.windows(2)
        .map(|pair| (pair[1].balance - pair[0].balance).abs())
        .collect();

    if deltas.len() < 2 {
        return Vec::new();
    }

    let Some(mean_delta) = mean(&deltas) else {
        return Vec::new();
    };

    let Some(std_dev_delta) = sample_std_dev(&deltas, mean_delta) else {
        return Vec::new();
    };

    let cutoff = mean_delta + sigma_multiplier * std_dev_delta;

    deltas.iter().enumerate()
        .filter(|(_, delta)| **delta > cutoff)
        .map(|(offset, delta)| {
            let series_index = offset + 1;
            let point = series[series_index];

            SignificantChange {
                series_index,
                timestamp: point.timestamp,
                balance: point.balance,
                delta: *delta
            }
        })
        .collect()
}
