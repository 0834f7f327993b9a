use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use crate::utils::date::parse_date_arg;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { date, all, yes } = cmd {
        //
        // Resolve target before asking anything
        //
        let day = match (date, all) {
            (_, true) => None,
            (Some(d), false) => Some(parse_date_arg(d)?),
            (None, false) => return Err(AppError::InvalidDate("missing date".into())),
        };

        //
        // Confirmation prompt
        //
        let prompt = match day {
            Some(d) => format!("Delete the entry for {}? This action is irreversible.", d),
            None => "Delete ALL ledger entries? This action is irreversible.".to_string(),
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let pool = open_db(&cfg.database)?;
        let ledger = Ledger::new(&pool.conn);

        match day {
            Some(d) => {
                ledger.delete(d)?;
                audit(&pool.conn, "del", &d.to_string(), "Daily total deleted");
                success(format!("Entry for {} has been deleted.", d));
            }
            None => {
                let removed = ledger.delete_all()?;
                audit(
                    &pool.conn,
                    "del_all",
                    "",
                    &format!("{} ledger entries deleted", removed),
                );
                success(format!("{} ledger entries have been deleted.", removed));
            }
        }
    }

    Ok(())
}
