//! Time range value type

use chrono::{DateTime, FixedOffset};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A span between two instants.
///
/// `start <= end` is not enforced. An inverted range is not rejected; the
/// strict overlap formula is applied to it as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(deserialize_with = "rfc3339")]
    pub start: DateTime<FixedOffset>,
    #[serde(deserialize_with = "rfc3339")]
    pub end: DateTime<FixedOffset>,
}

/// Strict RFC 3339: the offset must be `Z` or `+HH:MM` / `-HH:MM`
fn rfc3339<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if !has_rfc3339_offset(&raw) {
        return Err(de::Error::custom(format!(
            "invalid RFC 3339 timestamp {:?}: offset must be Z or +HH:MM",
            raw
        )));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| de::Error::custom(format!("invalid RFC 3339 timestamp {:?}: {}", raw, e)))
}

fn has_rfc3339_offset(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    match bytes.last() {
        Some(b'Z' | b'z') => true,
        _ => {
            bytes.len() >= 6
                && matches!(bytes[bytes.len() - 6], b'+' | b'-')
                && bytes[bytes.len() - 3] == b':'
        }
    }
}

impl DateRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Strict overlap: touching endpoints do not count.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}
