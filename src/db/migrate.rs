use crate::core::ledger::Ledger;
use crate::db::log::ttlog;
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::legacy_entry::LEGACY_PREFIX;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

const KV_STORE_VERSION: &str = "20250301_0001_create_kv_store";
const FOLD_LEGACY_TARGET: &str = "fold_legacy_entries";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `kv_store` table exists.
fn kv_store_table_exists(conn: &Connection) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='kv_store'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the flat key-value table. The primary key keeps keys ordered, so
/// `BETWEEN` on `dailyTotals_<date>` keys is an index range scan.
fn create_kv_store_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key   TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        ) WITHOUT ROWID;
        "#,
    )?;
    Ok(())
}

/// Tables every command needs. Cheap enough to run on each open.
pub fn ensure_schema(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if !kv_store_table_exists(conn)? {
        create_kv_store_table(conn)?;
        ttlog(
            conn,
            "migration_applied",
            KV_STORE_VERSION,
            "Created kv_store table",
        )?;
    }
    Ok(())
}

fn backup_before_migration(db_path: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_legacy_fold.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let db = std::path::Path::new(db_path);
    let backup_path = db
        .parent()
        .map(|p| p.join(&backup_name))
        .ok_or_else(|| AppError::Migration(format!("no parent directory for {db_path}")))?;

    let file = File::create(&backup_path)
        .map_err(|e| AppError::Migration(format!("Backup failed (create): {e}")))?;

    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| AppError::Migration(format!("Backup failed (start_file): {e}")))?;

    let db_content = fs::read(db)
        .map_err(|e| AppError::Migration(format!("Backup failed (read): {e}")))?;

    zip.write_all(&db_content)
        .map_err(|e| AppError::Migration(format!("Backup failed (write_all): {e}")))?;

    zip.finish()
        .map_err(|e| AppError::Migration(format!("Backup failed (finish): {e}")))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Fold per-session `clockEntry_*` values into `dailyTotals_*`.
/// Runs whenever legacy keys are present (e.g. after `import`); with none it
/// does nothing. Returns the number of folded entries.
pub fn migrate_fold_legacy_entries(conn: &Connection) -> AppResult<usize> {
    let pending = conn.keys_with_prefix(LEGACY_PREFIX)?;
    if pending.is_empty() {
        return Ok(0);
    }

    warning(format!(
        "{} legacy per-session entries found: creating safety backup before folding...",
        pending.len()
    ));

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    // DB in memoria: niente file da salvare
    if !db_path.is_empty() {
        backup_before_migration(&db_path)?;
    } else {
        warning("Could not determine DB path, backup skipped.");
    }

    let folded = Ledger::new(conn).fold_legacy()?;

    ttlog(
        conn,
        "migration_applied",
        FOLD_LEGACY_TARGET,
        &format!("Folded {folded} legacy entries into daily totals"),
    )?;

    success(format!(
        "Migration applied: folded {} legacy entries into daily totals",
        folded
    ));

    Ok(folded)
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::init_db() e da `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Tables
    ensure_schema(conn)?;

    // 2) Data: legacy ledger format
    migrate_fold_legacy_entries(conn)?;

    Ok(())
}
