//! Reporting granularity selectors.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PeriodKind {
    Daily,
    Weekly,
    Monthly,
}

/// How the weekly period is presented: one point per day or a single sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekMode {
    #[default]
    Days,
    Total,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    Daily,
    Weekly(WeekMode),
    Monthly,
}

impl Period {
    pub fn new(kind: PeriodKind, week_mode: WeekMode) -> Self {
        match kind {
            PeriodKind::Daily => Period::Daily,
            PeriodKind::Weekly => Period::Weekly(week_mode),
            PeriodKind::Monthly => Period::Monthly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly(WeekMode::Days) => "weekly (per day)",
            Period::Weekly(WeekMode::Total) => "weekly (total)",
            Period::Monthly => "monthly",
        }
    }
}
