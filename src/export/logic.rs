use crate::core::ledger::Ledger;
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::DailyTotalExport;
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use crate::utils::path::expand_tilde;

/// High-level export of the daily ledger.
pub struct ExportLogic;

impl ExportLogic {
    /// - `file`: absolute output path (`~/` is expanded)
    /// - `range`: `None`, `"all"` or a period expression (see `parse_range`)
    ///
    /// Returns the number of exported rows.
    pub fn export(
        store: &dyn KeyValueStore,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let ledger = Ledger::new(store);
        let totals = match range {
            None => ledger.list_all()?,
            Some(r) if r.eq_ignore_ascii_case("all") => ledger.list_all()?,
            Some(r) => {
                let (from, to) = parse_range(r)?;
                ledger.range(from, to)?
            }
        };

        if totals.is_empty() {
            warning("No daily totals found for selected range.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        let rows: Vec<DailyTotalExport> = totals.iter().map(DailyTotalExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        Ok(rows.len())
    }
}
