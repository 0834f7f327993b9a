//! Persisted hourly wage setting (`hourlyWage` key).
//!
//! Nothing reloads the value behind the caller's back: call `refresh()`
//! before computing earnings or showing the setting.

use crate::core::calculator::earnings::{EarningsCalculator, is_valid_wage};
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use serde_json::Value;

pub const WAGE_KEY: &str = "hourlyWage";

pub struct WageConfig<'s> {
    store: &'s dyn KeyValueStore,
    calc: EarningsCalculator,
    cached: f64,
}

/// Validate user input for the wage field.
pub fn parse_wage(input: &str) -> AppResult<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidWage(input.to_string()))?;

    if !is_valid_wage(value) {
        return Err(AppError::InvalidWage(input.to_string()));
    }
    Ok(value)
}

/// Decode a stored value: a JSON number, a JSON string holding a number,
/// or bare text.
fn decode_stored(raw: &str) -> Option<f64> {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Number(n)) => n.as_f64(),
        Ok(Value::String(s)) => s.trim().parse().ok(),
        Ok(_) => None,
        Err(_) => raw.trim().parse().ok(),
    }?;
    is_valid_wage(value).then_some(value)
}

impl<'s> WageConfig<'s> {
    /// The cached wage starts at the default until `refresh()` is called.
    pub fn new(store: &'s dyn KeyValueStore, calc: EarningsCalculator) -> Self {
        Self {
            store,
            calc,
            cached: calc.default_wage(),
        }
    }

    pub fn wage(&self) -> f64 {
        self.cached
    }

    pub fn default_wage(&self) -> f64 {
        self.calc.default_wage()
    }

    /// Re-read the stored wage. Missing or unusable values give the default;
    /// a failed read keeps the previous value and returns the error.
    pub fn refresh(&mut self) -> AppResult<f64> {
        let raw = self.store.get_item(WAGE_KEY)?;

        self.cached = match raw {
            None => self.calc.default_wage(),
            Some(raw) => decode_stored(&raw).unwrap_or_else(|| {
                warning(format!(
                    "Stored hourly wage '{}' is not a valid number. Using default {:.2}.",
                    raw,
                    self.calc.default_wage()
                ));
                self.calc.default_wage()
            }),
        };

        Ok(self.cached)
    }

    /// Persist a new wage. Invalid values are rejected before any write and
    /// the cache only changes after the write succeeded.
    pub fn set(&mut self, value: f64) -> AppResult<()> {
        if !is_valid_wage(value) {
            return Err(AppError::InvalidWage(value.to_string()));
        }

        let json = serde_json::to_string(&value).map_err(AppError::write)?;
        self.store.set_item(WAGE_KEY, &json)?;
        self.cached = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;

    #[test]
    fn missing_wage_is_default() {
        let store = MemoryStore::new();
        let mut cfg = WageConfig::new(&store, EarningsCalculator::default());
        assert_eq!(cfg.refresh().unwrap(), 20.0);
    }

    #[test]
    fn set_then_refresh_round_trips_as_json_float() {
        let store = MemoryStore::new();
        let mut cfg = WageConfig::new(&store, EarningsCalculator::default());
        cfg.set(25.0).unwrap();
        assert_eq!(store.get_item(WAGE_KEY).unwrap().as_deref(), Some("25.0"));

        let mut other = WageConfig::new(&store, EarningsCalculator::default());
        assert_eq!(other.refresh().unwrap(), 25.0);
    }

    #[test]
    fn corrupted_wage_falls_back_to_default() {
        let store = MemoryStore::new();
        let calc = EarningsCalculator::new(18.0);

        for raw in ["\"abc\"", "{}", "-3", "0", "null", "garbage"] {
            store.set_item(WAGE_KEY, raw).unwrap();
            let mut cfg = WageConfig::new(&store, calc);
            assert_eq!(cfg.refresh().unwrap(), 18.0, "raw value {raw}");
        }
    }

    #[test]
    fn string_encoded_numbers_are_accepted() {
        let store = MemoryStore::new();
        store.set_item(WAGE_KEY, "\"22.5\"").unwrap();
        let mut cfg = WageConfig::new(&store, EarningsCalculator::default());
        assert_eq!(cfg.refresh().unwrap(), 22.5);
    }

    #[test]
    fn invalid_set_leaves_state_unchanged() {
        let store = MemoryStore::new();
        let mut cfg = WageConfig::new(&store, EarningsCalculator::default());
        cfg.set(30.0).unwrap();

        assert!(matches!(cfg.set(0.0), Err(AppError::InvalidWage(_))));
        assert!(matches!(cfg.set(f64::NAN), Err(AppError::InvalidWage(_))));
        assert_eq!(cfg.wage(), 30.0);
        assert_eq!(store.get_item(WAGE_KEY).unwrap().as_deref(), Some("30.0"));
    }

    #[test]
    fn parse_wage_validates_text() {
        assert_eq!(parse_wage(" 17.25 ").unwrap(), 17.25);
        assert!(parse_wage("twelve").is_err());
        assert!(parse_wage("-1").is_err());
        assert!(parse_wage("0").is_err());
    }
}
