use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::db::store::KeyValueStore;
use crate::errors::AppResult;
use crate::models::legacy_entry::LEGACY_PREFIX;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::{hours2readable, money};
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str, currency: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ENTRIES
    //
    let ledger = Ledger::new(&pool.conn);
    let totals = ledger.list_all()?;
    let legacy = pool.conn.keys_with_prefix(LEGACY_PREFIX)?.len();

    println!(
        "{}• Daily totals:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        totals.len(),
        RESET
    );
    println!(
        "{}• Legacy entries:{} {}",
        CYAN,
        RESET,
        if legacy == 0 {
            format!("{GREY}0{RESET}")
        } else {
            format!("{YELLOW}{legacy}{RESET} (run `db --migrate` to fold them)")
        }
    );

    //
    // 3) DATE RANGE
    //
    let fmt_first = totals
        .first()
        .map(|t| t.date.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = totals
        .last()
        .map(|t| t.date.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) GRAND TOTALS
    //
    if !totals.is_empty() {
        let hours: f64 = totals.iter().map(|t| t.total_hours).sum();
        let earnings: f64 = totals.iter().map(|t| t.total_earnings).sum();
        println!(
            "{}• Worked:{} {}  {}• Earned:{} {}",
            CYAN,
            RESET,
            hours2readable(hours),
            CYAN,
            RESET,
            money(earnings, currency)
        );
    }

    println!();
    Ok(())
}
