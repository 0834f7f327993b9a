use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date_arg;
use crate::utils::{hours2readable, money};

fn parse_amount(what: &str, raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::InvalidManualEntry(format!("{what} is not a number: '{raw}'")))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        date,
        earnings,
        hours,
    } = cmd
    {
        //
        // 1. Validate everything before touching the DB
        //
        let day = parse_date_arg(date)?;
        let new_earnings = parse_amount("earnings", earnings)?;
        let new_hours = hours
            .as_deref()
            .map(|h| parse_amount("hours", h))
            .transpose()?;

        //
        // 2. Overwrite
        //
        let pool = open_db(&cfg.database)?;
        let total = Ledger::new(&pool.conn).edit_entry(day, new_earnings, new_hours)?;

        audit(
            &pool.conn,
            "edit",
            &day.to_string(),
            &format!(
                "earnings={:.2} hours={:.2}",
                total.total_earnings, total.total_hours
            ),
        );

        if new_hours.is_none() {
            warning("No --hours given: worked hours for this day were reset to 0.");
        }
        success(format!(
            "{} updated: {} | {}",
            day,
            hours2readable(total.total_hours),
            money(total.total_earnings, &cfg.currency)
        ));
    }

    Ok(())
}
