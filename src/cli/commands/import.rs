use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let pool = open_db(&cfg.database)?;

        let summary = ImportLogic::import_file(&pool.conn, &path)?;

        audit(
            &pool.conn,
            "import",
            file,
            &format!(
                "daily={} legacy={} wage={} skipped={}",
                summary.daily, summary.legacy, summary.wage, summary.skipped
            ),
        );

        success(format!(
            "Imported {} keys ({} daily totals, {} legacy entries{}).",
            summary.imported(),
            summary.daily,
            summary.legacy,
            if summary.wage { ", hourly wage" } else { "" }
        ));

        if summary.skipped > 0 {
            warning(format!("{} keys were skipped.", summary.skipped));
        }
        if summary.legacy > 0 {
            info("Run `wageclock db --migrate` to fold legacy entries into daily totals.");
        }
    }
    Ok(())
}
