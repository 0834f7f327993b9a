//! Flat key-value storage used by the ledger and the wage setting.
//!
//! Keys are plain strings (`hourlyWage`, `dailyTotals_<YYYY-MM-DD>`,
//! `clockEntry_<timestamp>`). Implementations keep keys ordered, so a
//! date-prefixed key range is a direct range query rather than a full scan.

use crate::errors::AppResult;
use std::cell::RefCell;
use std::collections::BTreeMap;

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> AppResult<()>;

    /// All keys starting with `prefix`, ascending.
    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>>;

    /// Entries with `start <= key <= end`, ascending by key.
    fn range(&self, start: &str, end: &str) -> AppResult<Vec<(String, String)>>;

    /// Run `f` so that either every write it makes lands or none does.
    fn atomically(&self, f: &mut dyn FnMut() -> AppResult<()>) -> AppResult<()>;

    fn multi_remove(&self, keys: &[String]) -> AppResult<()> {
        for k in keys {
            self.remove_item(k)?;
        }
        Ok(())
    }

    /// Entries whose key starts with `prefix`, ascending by key.
    fn entries_with_prefix(&self, prefix: &str) -> AppResult<Vec<(String, String)>> {
        let mut out = Vec::new();
        for key in self.keys_with_prefix(prefix)? {
            if let Some(value) = self.get_item(&key)? {
                out.push((key, value));
            }
        }
        Ok(out)
    }
}

/// In-memory ordered store. Used by tests and by `--db :memory:`-style runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        Ok(self
            .items
            .borrow()
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    fn atomically(&self, f: &mut dyn FnMut() -> AppResult<()>) -> AppResult<()> {
        let snapshot = self.items.borrow().clone();
        let result = f();
        if result.is_err() {
            *self.items.borrow_mut() = snapshot;
        }
        result
    }

    fn range(&self, start: &str, end: &str) -> AppResult<Vec<(String, String)>> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self
            .items
            .borrow()
            .range(start.to_string()..=end.to_string())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
