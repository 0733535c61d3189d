use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("Timestamp error: {0}")]
    InvalidFormat(String),
    #[error("Timestamp error: {0}")]
    Parse(#[from] chrono::ParseError)
}
