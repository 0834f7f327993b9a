//! Persistent, date-keyed store of accumulated daily totals.
//!
//! Every operation is a plain read or read-modify-write against the
//! key-value store. Callers issue one operation at a time and wait for it;
//! `upsert_daily` is not atomic against interleaved writers.

use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::daily_total::{DAILY_PREFIX, DailyTotal, StoredTotals, daily_key, date_from_key};
use crate::models::legacy_entry::{LEGACY_PREFIX, LegacyEntry};
use crate::ui::messages::warning;
use chrono::NaiveDate;

pub struct Ledger<'s> {
    store: &'s dyn KeyValueStore,
}

fn check_amount(what: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{what} must be a number (got {value})"));
    }
    if value < 0.0 {
        return Err(format!("{what} must not be negative (got {value})"));
    }
    Ok(())
}

fn usable(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

impl<'s> Ledger<'s> {
    pub fn new(store: &'s dyn KeyValueStore) -> Self {
        Self { store }
    }

    fn parse(date: NaiveDate, raw: &str) -> AppResult<DailyTotal> {
        let stored: StoredTotals = serde_json::from_str(raw).map_err(|e| {
            AppError::StorageRead(format!("corrupted entry {}: {e}", daily_key(&date)))
        })?;
        Ok(DailyTotal::from_stored(date, stored))
    }

    fn write(&self, total: DailyTotal) -> AppResult<()> {
        let json = serde_json::to_string(&total.to_stored()).map_err(AppError::write)?;
        self.store.set_item(&total.key(), &json)
    }

    /// Stored total for `date`, or the zero value when nothing is stored.
    pub fn get(&self, date: NaiveDate) -> AppResult<DailyTotal> {
        match self.store.get_item(&daily_key(&date))? {
            Some(raw) => Self::parse(date, &raw),
            None => Ok(DailyTotal::zero(date)),
        }
    }

    /// Add a saved session to the total of `date`.
    pub fn upsert_daily(
        &self,
        date: NaiveDate,
        hours_delta: f64,
        earnings_delta: f64,
    ) -> AppResult<DailyTotal> {
        check_amount("hours", hours_delta).map_err(AppError::InvalidIncrement)?;
        check_amount("earnings", earnings_delta).map_err(AppError::InvalidIncrement)?;

        let mut total = self.get(date)?;
        total.total_hours += hours_delta;
        total.total_earnings += earnings_delta;

        self.write(total)?;
        Ok(total)
    }

    /// Manual overwrite from the history editor.
    ///
    /// Earnings are replaced, not added. When `hours` is `None` the stored
    /// hours are reset to 0: edits made from the history screen never carried
    /// hours, and existing data relies on that.
    pub fn edit_entry(
        &self,
        date: NaiveDate,
        new_earnings: f64,
        hours: Option<f64>,
    ) -> AppResult<DailyTotal> {
        check_amount("earnings", new_earnings).map_err(AppError::InvalidManualEntry)?;
        if let Some(h) = hours {
            check_amount("hours", h).map_err(AppError::InvalidManualEntry)?;
        }

        let total = DailyTotal {
            date,
            total_hours: hours.unwrap_or(0.0),
            total_earnings: new_earnings,
        };

        self.write(total)?;
        Ok(total)
    }

    /// Remove the entry for `date`. Missing entries are ignored.
    pub fn delete(&self, date: NaiveDate) -> AppResult<()> {
        self.store.remove_item(&daily_key(&date))
    }

    /// Remove every ledger entry, legacy ones included. Returns how many keys
    /// were removed. Keys outside the ledger namespaces are left alone.
    pub fn delete_all(&self) -> AppResult<usize> {
        let mut keys = self.store.keys_with_prefix(DAILY_PREFIX)?;
        keys.extend(self.store.keys_with_prefix(LEGACY_PREFIX)?);

        self.store.multi_remove(&keys)?;
        Ok(keys.len())
    }

    /// Every daily total, oldest first.
    pub fn list_all(&self) -> AppResult<Vec<DailyTotal>> {
        let rows = self.store.entries_with_prefix(DAILY_PREFIX)?;
        self.collect(rows)
    }

    /// Daily totals with `from <= date <= to`, oldest first.
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<DailyTotal>> {
        let rows = self.store.range(&daily_key(&from), &daily_key(&to))?;
        self.collect(rows)
    }

    fn collect(&self, rows: Vec<(String, String)>) -> AppResult<Vec<DailyTotal>> {
        let mut out = Vec::with_capacity(rows.len());
        for (key, raw) in rows {
            match date_from_key(&key) {
                Some(date) => out.push(Self::parse(date, &raw)?),
                None => warning(format!("Skipping ledger key with invalid date: {key}")),
            }
        }
        out.sort_by_key(|t| t.date);
        Ok(out)
    }

    /// Per-session entries from older builds, newest first.
    pub fn list_legacy(&self) -> AppResult<Vec<LegacyEntry>> {
        let mut out = Vec::new();
        for (key, raw) in self.store.entries_with_prefix(LEGACY_PREFIX)? {
            match LegacyEntry::parse(&key, &raw) {
                Some(e) => out.push(e),
                None => warning(format!("Skipping unreadable legacy entry: {key}")),
            }
        }
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(out)
    }

    /// Fold every legacy per-session entry into the daily total of its local
    /// date and drop the legacy key. Returns the number of folded entries.
    ///
    /// Unreadable legacy entries are kept so that nothing is lost silently.
    /// Each entry is folded atomically: after a failure it is still pending
    /// and the daily total has not moved.
    pub fn fold_legacy(&self) -> AppResult<usize> {
        let entries = self.list_legacy()?;

        // ogni voce: totale aggiornato e chiave rimossa insieme, o niente
        for e in &entries {
            self.store.atomically(&mut || {
                self.upsert_daily(
                    e.local_date(),
                    usable(e.total_hours),
                    usable(e.total_earnings),
                )?;
                self.store.remove_item(&e.key)
            })?;
        }

        Ok(entries.len())
    }
}
