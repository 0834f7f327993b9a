//! Daily ledger entry and its persisted representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Key namespace of the canonical ledger format.
pub const DAILY_PREFIX: &str = "dailyTotals_";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_hours: f64,
    pub total_earnings: f64,
}

impl DailyTotal {
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            total_hours: 0.0,
            total_earnings: 0.0,
        }
    }

    pub fn key(&self) -> String {
        daily_key(&self.date)
    }

    pub(crate) fn from_stored(date: NaiveDate, stored: StoredTotals) -> Self {
        Self {
            date,
            total_hours: stored.total_hours,
            total_earnings: stored.total_earnings,
        }
    }

    pub(crate) fn to_stored(self) -> StoredTotals {
        StoredTotals {
            total_hours: self.total_hours,
            total_earnings: self.total_earnings,
        }
    }
}

/// JSON value stored under `dailyTotals_<YYYY-MM-DD>`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredTotals {
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub total_earnings: f64,
}

pub fn daily_key(date: &NaiveDate) -> String {
    format!("{DAILY_PREFIX}{}", date.format("%Y-%m-%d"))
}

pub fn date_from_key(key: &str) -> Option<NaiveDate> {
    let raw = key.strip_prefix(DAILY_PREFIX)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_sort_chronologically() {
        let a = daily_key(&NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        let b = daily_key(&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let c = daily_key(&NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
        assert!(a < b && b < c);
        assert_eq!(b, "dailyTotals_2024-01-01");
    }

    #[test]
    fn key_parsing_rejects_foreign_namespace() {
        assert_eq!(
            date_from_key("dailyTotals_2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(date_from_key("hourlyWage"), None);
        assert_eq!(date_from_key("dailyTotals_garbage"), None);
    }

    #[test]
    fn stored_format_uses_camel_case() {
        let json = serde_json::to_string(&StoredTotals {
            total_hours: 1.5,
            total_earnings: 37.5,
        })
        .unwrap();
        assert_eq!(json, r#"{"totalHours":1.5,"totalEarnings":37.5}"#);

        // the history editor of older builds wrote only totalEarnings
        let partial: StoredTotals = serde_json::from_str(r#"{"totalEarnings":3}"#).unwrap();
        assert_eq!(partial.total_hours, 0.0);
        assert_eq!(partial.total_earnings, 3.0);
    }
}
