use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::core::ledger::Ledger;
use crate::db::log::audit;
use crate::db::migrate::migrate_fold_legacy_entries;
use crate::db::stats;
use crate::db::store::KeyValueStore;
use crate::errors::AppResult;
use crate::models::daily_total::{DAILY_PREFIX, date_from_key};
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

/// Daily keys whose date or value can no longer be read.
fn unreadable_daily_keys(store: &dyn KeyValueStore) -> AppResult<Vec<String>> {
    let ledger = Ledger::new(store);
    let mut bad = Vec::new();
    for key in store.keys_with_prefix(DAILY_PREFIX)? {
        let readable = date_from_key(&key).is_some_and(|d| ledger.get(d).is_ok());
        if !readable {
            bad.push(key);
        }
    }
    Ok(bad)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = open_db(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            // schema già garantito da open_db
            let folded = migrate_fold_legacy_entries(&pool.conn)?;
            if folded == 0 {
                info("No legacy entries to fold: the ledger is up to date.");
            }
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 2) INFO
        //
        if *show_info {
            stats::print_db_info(&pool, &cfg.database, &cfg.currency)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ SQLite integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ SQLite integrity check failed:{} {}", RED, RESET, integrity);
            }

            let bad = unreadable_daily_keys(&pool.conn)?;
            if bad.is_empty() {
                println!("{}✔ All daily totals are readable.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}⚠ {} unreadable daily entries:{} {}\n",
                    YELLOW,
                    bad.len(),
                    RESET,
                    bad.join(", ")
                );
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            audit(&pool.conn, "vacuum", "", "Database optimized");
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
