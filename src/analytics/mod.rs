mod stats;
mod summary;

pub use stats::DescriptiveStats;
pub use summary::{
    parse_transactions, summarize, AnalysisReport, AnalyticsSummary, BalancePoint, CategoryBreakdown,
    IncomePoint, SignificantChange, SizeDistribution, SkippedRecord, SummaryConfig
};
