use crate::models::daily_total::DailyTotal;
use serde::Serialize;

/// Flat row for CSV / JSON export of the ledger.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DailyTotalExport {
    pub date: String,
    pub weekday: String,
    pub total_hours: f64,
    pub total_earnings: f64,
}

impl From<&DailyTotal> for DailyTotalExport {
    fn from(t: &DailyTotal) -> Self {
        Self {
            date: t.date.format("%Y-%m-%d").to_string(),
            weekday: t.date.format("%a").to_string(),
            total_hours: t.total_hours,
            total_earnings: t.total_earnings,
        }
    }
}
