use rust_decimal::Decimal;
use serde::Deserialize;
use std::borrow::Cow;
use std::str::FromStr;

use crate::models::errors::RecordError;
use crate::models::TransactionKind;
use crate::types::{RecordIndex, Timestamp};

/// A scalar field that may arrive as either a JSON string or a bare number.
///
/// Statement exports carry amounts and balances as strings, but some upstream
/// producers emit plain numbers for the same fields. Both shapes decode here
/// and validation works on the textual form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Text(String),
    Number(serde_json::Number)
}

impl RawField {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(value) => Cow::Borrowed(value),
            Self::Number(value) => Cow::Owned(value.to_string())
        }
    }
}

/// One element of the statement's transaction array, exactly as exported.
///
/// Every field is optional at this stage. Validation decides which fields are
/// required and reports what is missing or malformed per record, so a bad
/// record never takes the rest of the statement down with it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub amount: Option<RawField>,
    #[serde(rename = "type")]
    pub kind: Option<RawField>,
    pub mode: Option<RawField>,
    #[serde(rename = "transactionTimestamp")]
    pub timestamp: Option<RawField>,
    #[serde(rename = "currentBalance")]
    pub balance: Option<RawField>,
    #[serde(rename = "valueDate")]
    pub value_date: Option<RawField>
}

/// A validated statement transaction.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Zero-based position of the record in the source array.
    pub index: RecordIndex,
    pub amount: Decimal,
    pub kind: TransactionKind,
    /// Payment channel label, e.g. UPI or NEFT.
    pub mode: String,
    pub timestamp: Timestamp,
    /// Account balance immediately after this transaction settled.
    pub balance: Decimal,
    /// Carried through for downstream consumers; no computed metric reads it.
    pub value_date: Option<Timestamp>
}

impl Transaction {
    /// Validates one raw record into a usable transaction.
    ///
    /// # Errors
    /// Returns `RecordError` naming the record index and field if:
    /// - A required field (`amount`, `type`, `mode`, `transactionTimestamp`,
    ///   `currentBalance`) is absent or blank.
    /// - A numeric field does not parse as a decimal.
    /// - A timestamp field is present but is not RFC 3339 with an offset.
    pub fn from_raw(index: RecordIndex, record: &RawRecord) -> Result<Self, RecordError> {
        let amount = require_decimal(index, "amount", record.amount.as_ref())?;
        let kind_tag = require_text(index, "type", record.kind.as_ref())?;
        let mode = require_text(index, "mode", record.mode.as_ref())?;
        let timestamp = require_timestamp(index, "transactionTimestamp", record.timestamp.as_ref())?;
        let balance = require_decimal(index, "currentBalance", record.balance.as_ref())?;

        // A blank valueDate counts as absent; it feeds no metric.
        let value_date = match record.value_date.as_ref().map(|field| field.as_text()) {
            Some(text) if !text.trim().is_empty() => Some(parse_timestamp(index, "valueDate", text.trim())?),
            _ => None
        };

        Ok(Self {
            index,
            amount,
            kind: TransactionKind::parse(&kind_tag),
            mode,
            timestamp,
            balance,
            value_date
        })
    }
}

fn require_text(index: RecordIndex, field: &'static str, value: Option<&RawField>) -> Result<String, RecordError> {
    let Some(value) = value else {
        return Err(RecordError::missing_field(index, field))
    };

    let text = value.as_text();
    let text = text.trim();

    if text.is_empty() {
        return Err(RecordError::missing_field(index, field));
    }

    Ok(text.to_string())
}

fn require_decimal(index: RecordIndex, field: &'static str, value: Option<&RawField>) -> Result<Decimal, RecordError> {
    let text = require_text(index, field, value)?;

    Decimal::from_str(&text).map_err(|_| RecordError::malformed_decimal(index, field, &text))
}

fn require_timestamp(index: RecordIndex, field: &'static str, value: Option<&RawField>) -> Result<Timestamp, RecordError> {
    let text = require_text(index, field, value)?;

    parse_timestamp(index, field, &text)
}

fn parse_timestamp(index: RecordIndex, field: &'static str, text: &str) -> Result<Timestamp, RecordError> {
    Timestamp::from_str(text).map_err(|_| RecordError::malformed_timestamp(index, field, text))
}
