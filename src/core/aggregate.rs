//! Read-only rollups of the ledger into daily / weekly / monthly series.

use crate::core::ledger::Ledger;
use crate::errors::AppResult;
use crate::models::daily_total::DailyTotal;
use crate::models::period::{Period, WeekMode};
use crate::models::series::{ChartPoint, ChartSeries};
use crate::utils::date::{first_of_month, last_of_month};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Length of a bucket when splitting a month.
pub const BUCKET_DAYS: u32 = 7;

/// Display rounding. Stored values are never rounded.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Sunday..=Saturday of the week containing `day`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day - Duration::days(day.weekday().num_days_from_sunday() as i64);
    (start, start + Duration::days(6))
}

/// Split the month of `day` into consecutive 7-day spans; the last may be
/// shorter. A month of `n` days gives `ceil(n / 7)` buckets.
pub fn month_buckets(day: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let first = first_of_month(day);
    let last = last_of_month(day);

    let mut out = Vec::new();
    let mut from = first;
    while from <= last {
        let to = (from + Duration::days(BUCKET_DAYS as i64 - 1)).min(last);
        out.push((from, to));
        from = to + Duration::days(1);
    }
    out
}

struct RawPoint {
    label: String,
    from: NaiveDate,
    to: NaiveDate,
    earnings: f64,
}

pub struct AggregationEngine<'a> {
    ledger: &'a Ledger<'a>,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(ledger: &'a Ledger<'a>) -> Self {
        Self { ledger }
    }

    pub fn series(&self, period: Period, today: NaiveDate) -> AppResult<ChartSeries> {
        match period {
            Period::Daily => self.daily(today),
            Period::Weekly(mode) => self.weekly(today, mode),
            Period::Monthly => self.monthly(today),
        }
    }

    fn daily(&self, today: NaiveDate) -> AppResult<ChartSeries> {
        let total = self.ledger.get(today)?;
        let points = vec![RawPoint {
            label: today.format("%Y-%m-%d").to_string(),
            from: today,
            to: today,
            earnings: total.total_earnings,
        }];
        Ok(finish(Period::Daily, points, total.total_hours))
    }

    fn weekly(&self, today: NaiveDate, mode: WeekMode) -> AppResult<ChartSeries> {
        let (start, end) = week_bounds(today);
        let by_day = self.load(start, end)?;

        let days: Vec<RawPoint> = start
            .iter_days()
            .take(7)
            .map(|d| RawPoint {
                label: d.format("%a %m-%d").to_string(),
                from: d,
                to: d,
                earnings: by_day.get(&d).map_or(0.0, |t| t.total_earnings),
            })
            .collect();

        let hours: f64 = by_day.values().map(|t| t.total_hours).sum();

        let points = match mode {
            WeekMode::Days => days,
            WeekMode::Total => vec![RawPoint {
                label: format!("Week of {}", start.format("%Y-%m-%d")),
                from: start,
                to: end,
                earnings: days.iter().map(|p| p.earnings).sum(),
            }],
        };

        Ok(finish(Period::Weekly(mode), points, hours))
    }

    fn monthly(&self, today: NaiveDate) -> AppResult<ChartSeries> {
        let by_day = self.load(first_of_month(today), last_of_month(today))?;

        let points = month_buckets(today)
            .into_iter()
            .enumerate()
            .map(|(i, (from, to))| RawPoint {
                label: format!("Week {}", i + 1),
                from,
                to,
                earnings: by_day
                    .range(from..=to)
                    .map(|(_, t)| t.total_earnings)
                    .sum(),
            })
            .collect();

        let hours: f64 = by_day.values().map(|t| t.total_hours).sum();
        Ok(finish(Period::Monthly, points, hours))
    }

    fn load(&self, from: NaiveDate, to: NaiveDate) -> AppResult<BTreeMap<NaiveDate, DailyTotal>> {
        Ok(self
            .ledger
            .range(from, to)?
            .into_iter()
            .map(|t| (t.date, t))
            .collect())
    }
}

fn finish(period: Period, raw: Vec<RawPoint>, hours: f64) -> ChartSeries {
    // soglia sui valori pieni, prima dell'arrotondamento
    let show_values = raw.iter().all(|p| p.earnings > 0.01);

    let points: Vec<ChartPoint> = raw
        .into_iter()
        .map(|p| ChartPoint {
            label: p.label,
            from: p.from,
            to: p.to,
            value: round2(p.earnings),
        })
        .collect();

    ChartSeries {
        period,
        points,
        total_hours: round2(hours),
        show_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_runs_sunday_to_saturday() {
        // 2024-03-06 is a Wednesday
        assert_eq!(week_bounds(d(2024, 3, 6)), (d(2024, 3, 3), d(2024, 3, 9)));
        // Sunday and Saturday map to their own week
        assert_eq!(week_bounds(d(2024, 3, 3)).0, d(2024, 3, 3));
        assert_eq!(week_bounds(d(2024, 3, 9)).0, d(2024, 3, 3));
        // across a month boundary
        assert_eq!(week_bounds(d(2024, 3, 1)), (d(2024, 2, 25), d(2024, 3, 2)));
    }

    #[test]
    fn february_2023_has_four_full_buckets() {
        let b = month_buckets(d(2023, 2, 14));
        assert_eq!(b.len(), 4);
        for (from, to) in &b {
            assert_eq!((*to - *from).num_days(), 6);
        }
        assert_eq!(b[3].1, d(2023, 2, 28));
    }

    #[test]
    fn thirty_one_day_month_ends_with_three_days() {
        let b = month_buckets(d(2024, 3, 20));
        assert_eq!(b.len(), 5);
        assert_eq!(b[4], (d(2024, 3, 29), d(2024, 3, 31)));
    }

    #[test]
    fn leap_february_and_thirty_day_month() {
        let feb = month_buckets(d(2024, 2, 1));
        assert_eq!(feb.len(), 5);
        assert_eq!(feb[4], (d(2024, 2, 29), d(2024, 2, 29)));

        let apr = month_buckets(d(2024, 4, 30));
        assert_eq!(apr.len(), 5);
        assert_eq!(apr[4], (d(2024, 4, 29), d(2024, 4, 30)));
    }

    #[test]
    fn rounding_is_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(37.5), 37.5);
    }
}
