use crate::types::errors::TimestampError;
use chrono::{DateTime, FixedOffset};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An offset-aware instant as found in statement exports.
///
/// Parsing is strict RFC 3339 and keeps whatever UTC offset the source record
/// carries. Two timestamps with different offsets compare by instant, so a
/// statement mixing offsets still sorts chronologically.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Display for Timestamp {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(TimestampError::InvalidFormat("Value is an empty string".to_string()));
        }

        // RFC 3339 requires an explicit offset, so a bare local time is rejected
        // rather than silently pinned to some assumed zone.
        let instant = DateTime::parse_from_rfc3339(value)?;

        Ok(Timestamp(instant))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Timestamp::from_str(&value).map_err(de::Error::custom)
    }
}
