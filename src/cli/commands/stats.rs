use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::AggregationEngine;
use crate::core::ledger::Ledger;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::models::series::ChartSeries;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, color_for_amount};
use crate::utils::date::{parse_date_arg, today};
use crate::utils::{hours2readable, money};

const BAR_WIDTH: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        period,
        week_mode,
        date,
    } = cmd
    {
        let day = match date {
            Some(d) => parse_date_arg(d)?,
            None => today(),
        };
        let period = Period::new(*period, week_mode.unwrap_or(cfg.week_mode));

        let pool = open_db(&cfg.database)?;
        let ledger = Ledger::new(&pool.conn);
        let series = AggregationEngine::new(&ledger).series(period, day)?;

        header(format!("Earnings | {} | {}", series.period.as_str(), day));
        render(&series, &cfg.currency);
    }

    Ok(())
}

/// Horizontal bar chart. Amounts are printed next to the bars only when the
/// series says so; the totals line is always shown.
fn render(series: &ChartSeries, currency: &str) {
    let max = series.values().into_iter().fold(0.0_f64, f64::max);
    let label_w = series
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    for p in &series.points {
        let len = if max > 0.0 {
            ((p.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = format!("{}{}{}", color_for_amount(p.value), "█".repeat(len), RESET);

        if series.show_values {
            println!(
                "{:<w$} │{} {}",
                p.label,
                bar,
                money(p.value, currency),
                w = label_w
            );
        } else {
            println!("{:<w$} │{}", p.label, bar, w = label_w);
        }
    }

    let earnings: f64 = series.values().iter().sum();
    println!("{}{}{}", GREY, "─".repeat(label_w + BAR_WIDTH + 12), RESET);
    println!(
        "Total: {} | {}",
        money(earnings, currency),
        hours2readable(series.total_hours)
    );
}
