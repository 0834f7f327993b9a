use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::utils::colors::colorize_amount;
use crate::utils::date::parse_date_arg;
use crate::utils::{hours2readable, money};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Get { date } = cmd {
        let day = parse_date_arg(date)?;
        let pool = open_db(&cfg.database)?;

        let total = Ledger::new(&pool.conn).get(day)?;

        println!(
            "📅 {} ({})  Hours: {}  Earnings: {}",
            day,
            day.format("%a"),
            hours2readable(total.total_hours),
            colorize_amount(
                total.total_earnings,
                &money(total.total_earnings, &cfg.currency)
            )
        );
    }

    Ok(())
}
