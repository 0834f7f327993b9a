//! Per-session entries written by older builds under `clockEntry_<timestamp>`.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::Deserialize;

pub const LEGACY_PREFIX: &str = "clockEntry_";

#[derive(Debug, Clone, PartialEq)]
pub struct LegacyEntry {
    pub key: String,
    pub timestamp: DateTime<FixedOffset>,
    pub total_hours: f64,
    pub total_earnings: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLegacy {
    timestamp: String,
    #[serde(default)]
    total_hours: f64,
    #[serde(default)]
    total_earnings: f64,
}

impl LegacyEntry {
    /// Parse a stored value. Returns `None` when the JSON or the timestamp
    /// cannot be read.
    pub fn parse(key: &str, value: &str) -> Option<Self> {
        let stored: StoredLegacy = serde_json::from_str(value).ok()?;
        let timestamp = DateTime::parse_from_rfc3339(&stored.timestamp).ok()?;
        Some(Self {
            key: key.to_string(),
            timestamp,
            total_hours: stored.total_hours,
            total_earnings: stored.total_earnings,
        })
    }

    /// Calendar date of the session in local time.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mobile_app_format() {
        let e = LegacyEntry::parse(
            "clockEntry_2024-03-01T10:15:00.000Z",
            r#"{"timestamp":"2024-03-01T10:15:00.000Z","totalHours":0.5,"totalEarnings":12.5}"#,
        )
        .unwrap();
        assert_eq!(e.total_hours, 0.5);
        assert_eq!(e.total_earnings, 12.5);
        assert_eq!(e.timestamp.to_rfc3339(), "2024-03-01T10:15:00+00:00");
    }

    #[test]
    fn rejects_bad_timestamp_or_json() {
        assert!(LegacyEntry::parse("k", "not json").is_none());
        assert!(LegacyEntry::parse("k", r#"{"timestamp":"yesterday"}"#).is_none());
    }
}
