//! Conversion of elapsed time and hourly wage into money.

pub const MS_PER_HOUR: f64 = 3_600_000.0;
pub const DEFAULT_WAGE: f64 = 20.0;

/// A wage is usable when it is a finite number above zero.
pub fn is_valid_wage(wage: f64) -> bool {
    wage.is_finite() && wage > 0.0
}

/// Elapsed milliseconds as fractional hours. Negative input counts as zero.
pub fn hours(elapsed_ms: i64) -> f64 {
    elapsed_ms.max(0) as f64 / MS_PER_HOUR
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarningsCalculator {
    default_wage: f64,
}

impl Default for EarningsCalculator {
    fn default() -> Self {
        Self {
            default_wage: DEFAULT_WAGE,
        }
    }
}

impl EarningsCalculator {
    /// `default_wage` comes from the config file; an unusable value falls
    /// back to the built-in default.
    pub fn new(default_wage: f64) -> Self {
        if is_valid_wage(default_wage) {
            Self { default_wage }
        } else {
            Self::default()
        }
    }

    pub fn default_wage(&self) -> f64 {
        self.default_wage
    }

    /// The wage that will actually be applied.
    pub fn effective_wage(&self, wage: Option<f64>) -> f64 {
        match wage {
            Some(w) if is_valid_wage(w) => w,
            _ => self.default_wage,
        }
    }

    /// `(elapsed_ms / 3_600_000) * wage`. Always finite and non-negative.
    pub fn earnings(&self, elapsed_ms: i64, wage: Option<f64>) -> f64 {
        hours(elapsed_ms) * self.effective_wage(wage)
    }

    /// Hours and earnings to add to the ledger for one saved session.
    pub fn increment(&self, elapsed_ms: i64, wage: Option<f64>) -> (f64, f64) {
        (hours(elapsed_ms), self.earnings(elapsed_ms, wage))
    }
}
