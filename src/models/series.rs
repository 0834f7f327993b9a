//! Output of the aggregation engine, consumed by chart/table renderers.

use crate::models::period::Period;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Earnings, rounded to 2 decimals.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub period: Period,
    pub points: Vec<ChartPoint>,
    pub total_hours: f64,
    /// Rendering hint: every point is above 0.01 before rounding.
    pub show_values: bool,
}

impl ChartSeries {
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}
