use crate::types::RecordIndex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record [{index}] is missing required field [{field}]")]
    MissingField {
        index: RecordIndex,
        field: &'static str
    },
    #[error("Record [{index}] has a malformed decimal in field [{field}]: {value:?}")]
    MalformedDecimal {
        index: RecordIndex,
        field: &'static str,
        value: String
    },
    #[error("Record [{index}] has a malformed timestamp in field [{field}]: {value:?}")]
    MalformedTimestamp {
        index: RecordIndex,
        field: &'static str,
        value: String
    }
}

impl RecordError {
    pub fn missing_field(index: RecordIndex, field: &'static str) -> Self {
        Self::MissingField { index, field }
    }

    pub fn malformed_decimal(index: RecordIndex, field: &'static str, value: &str) -> Self {
        Self::MalformedDecimal {
            index,
            field,
            value: value.to_string()
        }
    }

    pub fn malformed_timestamp(index: RecordIndex, field: &'static str, value: &str) -> Self {
        Self::MalformedTimestamp {
            index,
            field,
            value: value.to_string()
        }
    }

    /// Index of the record this error names.
    pub fn index(&self) -> RecordIndex {
        match self {
            Self::MissingField { index, .. }
            | Self::MalformedDecimal { index, .. }
            | Self::MalformedTimestamp { index, .. } => *index
        }
    }
}
