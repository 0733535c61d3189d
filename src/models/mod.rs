mod errors;
mod transaction;

pub use errors::RecordError;
pub use transaction::{RawField, RawRecord, Transaction};

/// Tag carried by each statement record.
///
/// Tags outside DEBIT/CREDIT are preserved for the type distribution but are
/// excluded from the debit and credit specific aggregates.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TransactionKind {
    Debit,
    Credit,
    Other(String)
}

impl TransactionKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "DEBIT" => Self::Debit,
            "CREDIT" => Self::Credit,
            other => Self::Other(other.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
            Self::Other(tag) => tag
        }
    }
}
