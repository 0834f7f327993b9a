//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // User input
    // ---------------------------
    #[error("Invalid hourly wage: {0} (expected a number greater than 0)")]
    InvalidWage(String),

    #[error("Invalid manual entry: {0}")]
    InvalidManualEntry(String),

    #[error("Invalid ledger increment: {0}")]
    InvalidIncrement(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn read<E: std::fmt::Display>(e: E) -> Self {
        AppError::StorageRead(e.to_string())
    }

    pub fn write<E: std::fmt::Display>(e: E) -> Self {
        AppError::StorageWrite(e.to_string())
    }

    /// Storage failures are reported as notices by the interactive clock;
    /// everything else aborts the current command.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::StorageRead(_) | AppError::StorageWrite(_) | AppError::Db(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
