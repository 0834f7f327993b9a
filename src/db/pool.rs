//! SQLite connection wrapper (lightweight for CLI usage).
//! `Connection` is also the production implementation of the flat
//! key-value store, backed by the `kv_store` table.

use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Result, params};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for Connection {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        self.query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()
        .map_err(AppError::read)
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(AppError::write)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.execute("DELETE FROM kv_store WHERE key = ?1", [key])
            .map_err(AppError::write)?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        // substr() invece di LIKE: '_' nei prefissi è un carattere jolly per LIKE
        let mut stmt = self
            .prepare_cached(
                "SELECT key FROM kv_store
                 WHERE substr(key, 1, length(?1)) = ?1
                 ORDER BY key ASC",
            )
            .map_err(AppError::read)?;

        let rows = stmt
            .query_map([prefix], |row| row.get::<_, String>(0))
            .map_err(AppError::read)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(AppError::read)?);
        }
        Ok(out)
    }

    fn range(&self, start: &str, end: &str) -> AppResult<Vec<(String, String)>> {
        let mut stmt = self
            .prepare_cached(
                "SELECT key, value FROM kv_store
                 WHERE key BETWEEN ?1 AND ?2
                 ORDER BY key ASC",
            )
            .map_err(AppError::read)?;

        let rows = stmt
            .query_map(params![start, end], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(AppError::read)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(AppError::read)?);
        }
        Ok(out)
    }

    fn atomically(&self, f: &mut dyn FnMut() -> AppResult<()>) -> AppResult<()> {
        // già dentro una transazione: ci pensa quella esterna
        if !self.is_autocommit() {
            return f();
        }

        let tx = self.unchecked_transaction().map_err(AppError::write)?;
        f()?;
        tx.commit().map_err(AppError::write)
    }

    fn multi_remove(&self, keys: &[String]) -> AppResult<()> {
        if !self.is_autocommit() {
            for k in keys {
                self.remove_item(k)?;
            }
            return Ok(());
        }

        let tx = self.unchecked_transaction().map_err(AppError::write)?;
        {
            let mut stmt = tx
                .prepare_cached("DELETE FROM kv_store WHERE key = ?1")
                .map_err(AppError::write)?;
            for k in keys {
                stmt.execute([k]).map_err(AppError::write)?;
            }
        }
        tx.commit().map_err(AppError::write)
    }
}
