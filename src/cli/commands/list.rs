use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::daily_total::DailyTotal;
use crate::models::legacy_entry::LegacyEntry;
use crate::ui::messages::info;
use crate::utils::colors::{GREY, RESET, colorize_amount};
use crate::utils::date::parse_range;
use crate::utils::formatting::bold;
use crate::utils::{hours2readable, money};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, legacy } = cmd {
        let pool = open_db(&cfg.database)?;
        let ledger = Ledger::new(&pool.conn);

        if *legacy {
            let entries = ledger.list_legacy()?;
            if entries.is_empty() {
                info("No legacy session entries found.");
            } else {
                print_legacy(&entries, &cfg.currency);
            }
            return Ok(());
        }

        let totals = match period.as_deref() {
            None => ledger.list_all()?,
            Some(p) if p.eq_ignore_ascii_case("all") => ledger.list_all()?,
            Some(p) => {
                let (from, to) = parse_range(p)?;
                ledger.range(from, to)?
            }
        };

        if totals.is_empty() {
            info("No daily totals for the selected period.");
            return Ok(());
        }

        print_totals(&totals, &cfg.currency);
    }

    Ok(())
}

fn print_totals(totals: &[DailyTotal], currency: &str) {
    println!(
        "{}",
        bold(&format!("{:<12} {:<4} {:>9} {:>12}", "DATE", "DAY", "HOURS", "EARNINGS"))
    );

    for t in totals {
        let amount = format!("{:>12}", money(t.total_earnings, currency));
        println!(
            "{:<12} {:<4} {:>9} {}",
            t.date.to_string(),
            t.date.format("%a").to_string(),
            hours2readable(t.total_hours),
            colorize_amount(t.total_earnings, &amount)
        );
    }

    let hours: f64 = totals.iter().map(|t| t.total_hours).sum();
    let earnings: f64 = totals.iter().map(|t| t.total_earnings).sum();

    println!("{}{}{}", GREY, "-".repeat(40), RESET);
    println!(
        "{:<17} {:>9} {:>12}",
        format!("Total ({} days)", totals.len()),
        hours2readable(hours),
        money(earnings, currency)
    );
}

fn print_legacy(entries: &[LegacyEntry], currency: &str) {
    println!(
        "{}",
        bold(&format!("{:<26} {:>9} {:>12}", "TIMESTAMP", "HOURS", "EARNINGS"))
    );
    for e in entries {
        println!(
            "{:<26} {:>9} {:>12}",
            e.timestamp.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
            hours2readable(e.total_hours),
            money(e.total_earnings, currency)
        );
    }
    info(format!(
        "{} legacy entries. Run `wageclock db --migrate` to fold them into daily totals.",
        entries.len()
    ));
}
