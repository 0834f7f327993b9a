use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::wage::{WAGE_KEY, WageConfig, parse_wage};
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::db::store::KeyValueStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::money;

/// Show (after an explicit refresh) or set the hourly wage.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Wage { value } = cmd {
        let pool = open_db(&cfg.database)?;
        let mut wage = WageConfig::new(&pool.conn, cfg.calculator());

        match value {
            Some(raw) => {
                // validate first: nothing is written on bad input
                let v = parse_wage(raw)?;
                wage.set(v)?;

                audit(
                    &pool.conn,
                    "wage",
                    WAGE_KEY,
                    &format!("Hourly wage set to {:.2}", v),
                );
                success(format!("Hourly wage saved: {}", money(v, &cfg.currency)));
            }
            None => {
                let current = wage.refresh()?;
                let origin = if pool.conn.get_item(WAGE_KEY)?.is_some() {
                    ""
                } else {
                    " (default)"
                };
                info(format!(
                    "Hourly wage: {}{}",
                    money(current, &cfg.currency),
                    origin
                ));
            }
        }
    }

    Ok(())
}
