use crate::db::migrate::{ensure_schema, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Open the configured database for a regular command.
/// Only guarantees the tables exist; data migrations run on `init` and
/// `db --migrate`.
pub fn open_db(path: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(path)?;
    ensure_schema(&pool.conn)?;
    Ok(pool)
}

/// Initialize the database: schema plus every pending migration.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)
}
