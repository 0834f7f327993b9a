use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let pool = open_db(&cfg.database)?;
        let rows = ExportLogic::export(&pool.conn, *format, file, range, *force)?;

        if rows > 0 {
            audit(
                &pool.conn,
                "export",
                file,
                &format!("{} rows exported as {}", rows, format.as_str()),
            );
        }
    }
    Ok(())
}
