use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::core::wage::WageConfig;
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_date_arg, today};
use crate::utils::{hours2readable, money};

fn elapsed_ms(ms: &Option<i64>, minutes: &Option<f64>) -> AppResult<i64> {
    let value = match (ms, minutes) {
        (Some(ms), _) => *ms,
        (None, Some(m)) if m.is_finite() => (m * 60_000.0).round() as i64,
        (None, Some(m)) => {
            return Err(AppError::InvalidIncrement(format!("invalid minutes: {m}")));
        }
        (None, None) => {
            return Err(AppError::InvalidIncrement(
                "missing session length (--ms or --minutes)".into(),
            ));
        }
    };

    if value < 0 {
        return Err(AppError::InvalidIncrement(format!(
            "session length must not be negative (got {value} ms)"
        )));
    }
    Ok(value)
}

/// Book a finished session on the ledger using the current wage.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Save { ms, minutes, date } = cmd {
        let elapsed = elapsed_ms(ms, minutes)?;
        let day = match date {
            Some(d) => parse_date_arg(d)?,
            None => today(),
        };

        let pool = open_db(&cfg.database)?;
        let calc = cfg.calculator();

        let mut wage_cfg = WageConfig::new(&pool.conn, calc);
        let wage = wage_cfg.refresh()?;

        let (hours, earnings) = calc.increment(elapsed, Some(wage));
        let total = Ledger::new(&pool.conn).upsert_daily(day, hours, earnings)?;

        audit(
            &pool.conn,
            "save",
            &day.to_string(),
            &format!("+{:.4}h +{:.4} (wage {:.2})", hours, earnings, wage),
        );

        success(format!(
            "Saved {}: Total Hours: {:.2}h, Total Earnings: {}",
            day,
            hours,
            money(earnings, &cfg.currency)
        ));
        info(format!(
            "Day total: {} | {}",
            hours2readable(total.total_hours),
            money(total.total_earnings, &cfg.currency)
        ));
    }

    Ok(())
}
