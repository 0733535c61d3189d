mod errors;
mod timestamp;

pub use timestamp::Timestamp;

pub type RecordIndex = usize;
