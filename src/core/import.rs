//! Import of a key-space dump written by the mobile app's storage layer.
//!
//! The dump is a JSON object mapping keys to values. Values may be the raw
//! stored strings (`"{\"totalHours\":1}"`) or already-decoded JSON.

use crate::core::wage::WAGE_KEY;
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::daily_total::{DAILY_PREFIX, date_from_key};
use crate::models::legacy_entry::{LEGACY_PREFIX, LegacyEntry};
use crate::ui::messages::warning;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub daily: usize,
    pub legacy: usize,
    pub wage: bool,
    pub skipped: usize,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.daily + self.legacy + usize::from(self.wage)
    }
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn import_file(store: &dyn KeyValueStore, path: &Path) -> AppResult<ImportSummary> {
        let content = fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&content)?;

        match parsed {
            Value::Object(map) => Self::import_map(store, &map),
            _ => Err(AppError::Other(format!(
                "{}: expected a JSON object of key/value pairs",
                path.display()
            ))),
        }
    }

    /// Write every recognised key into the store. Unknown keys and values
    /// that would not be readable later are skipped with a warning.
    pub fn import_map(store: &dyn KeyValueStore, map: &Map<String, Value>) -> AppResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (key, value) in map {
            let raw = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            let accepted = if key == WAGE_KEY {
                summary.wage = true;
                true
            } else if key.starts_with(DAILY_PREFIX) {
                let ok = date_from_key(key).is_some()
                    && serde_json::from_str::<Value>(&raw).is_ok_and(|v| v.is_object());
                if ok {
                    summary.daily += 1;
                }
                ok
            } else if key.starts_with(LEGACY_PREFIX) {
                let ok = LegacyEntry::parse(key, &raw).is_some();
                if ok {
                    summary.legacy += 1;
                }
                ok
            } else {
                false
            };

            if accepted {
                store.set_item(key, &raw)?;
            } else {
                warning(format!("Skipping key '{}'", key));
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }
}
