//! Interactive session clock.
//!
//! Commands are read one per line from stdin, so the clock can also be
//! driven by a pipe (`printf 'start\nsave\nquit\n' | wageclock clock`).

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::earnings::EarningsCalculator;
use crate::core::clock::{Clock, SystemClock};
use crate::core::ledger::Ledger;
use crate::core::ticker::Ticker;
use crate::core::timer::{SavedSession, SessionTimer};
use crate::core::wage::WageConfig;
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, notice, status_line, success, warning};
use crate::ui::prompt::confirm_from;
use crate::utils::formatting::format_elapsed;
use crate::utils::{hours2readable, money};
use std::io::{self, BufRead, IsTerminal};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Save,
    Clear,
    Status,
    Quit,
}

pub fn parse_action(line: &str) -> Option<Action> {
    match line.trim().to_lowercase().as_str() {
        "start" | "s" => Some(Action::Start),
        "stop" | "p" => Some(Action::Stop),
        "save" | "w" => Some(Action::Save),
        "clear" | "c" => Some(Action::Clear),
        "status" | "" => Some(Action::Status),
        "quit" | "q" | "exit" => Some(Action::Quit),
        _ => None,
    }
}

/// Options of one interactive run.
pub struct SessionOptions {
    pub currency: String,
    /// Live refresh of the elapsed time; `None` disables the ticker.
    pub tick_interval: Option<Duration>,
}

fn lock<C: Clock>(timer: &Mutex<SessionTimer<C>>) -> AppResult<MutexGuard<'_, SessionTimer<C>>> {
    timer
        .lock()
        .map_err(|_| AppError::Other("session timer lock poisoned".into()))
}

fn spawn_ticker<C: Clock>(timer: &Arc<Mutex<SessionTimer<C>>>, every: Duration) -> Ticker {
    let timer = Arc::clone(timer);
    Ticker::spawn(every, move || {
        if let Ok(t) = timer.lock() {
            status_line(format_elapsed(t.tick()));
        }
    })
}

/// Drive the clock until `quit` or end of input.
///
/// Storage failures on save are reported and the session goes on with the
/// timer untouched. `on_save` is called after every successful save.
pub fn run_session<C, R, F>(
    timer: SessionTimer<C>,
    input: &mut R,
    store: &dyn KeyValueStore,
    calc: EarningsCalculator,
    opts: &SessionOptions,
    mut on_save: F,
) -> AppResult<()>
where
    C: Clock,
    R: BufRead,
    F: FnMut(&SavedSession),
{
    let timer = Arc::new(Mutex::new(timer));
    let ledger = Ledger::new(store);
    let mut wage_cfg = WageConfig::new(store, calc);
    let mut ticker: Option<Ticker> = None;

    if let Err(e) = wage_cfg.refresh() {
        notice(&e);
    }

    info(format!(
        "Hourly wage: {}. Commands: start, stop, save, clear, status, quit",
        money(wage_cfg.wage(), &opts.currency)
    ));

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let Some(action) = parse_action(&line) else {
            warning(format!("Unknown command: '{}'", line.trim()));
            continue;
        };

        match action {
            Action::Start => {
                let mut t = lock(&timer)?;
                if t.is_active() {
                    info("Clock already running.");
                    continue;
                }
                t.start();
                drop(t);

                if let Some(every) = opts.tick_interval {
                    ticker = Some(spawn_ticker(&timer, every));
                }
                success("Clock started.");
            }

            Action::Stop => {
                if let Some(mut tk) = ticker.take() {
                    tk.cancel();
                }
                let mut t = lock(&timer)?;
                t.stop();
                success(format!("Clock stopped at {}", format_elapsed(t.elapsed_ms())));
            }

            Action::Save => {
                // il salario può essere cambiato da un altro comando nel frattempo
                let wage = match wage_cfg.refresh() {
                    Ok(w) => w,
                    Err(e) => {
                        notice(&e);
                        wage_cfg.wage()
                    }
                };

                let mut t = lock(&timer)?;
                match t.save(&ledger, &calc, wage) {
                    Ok(saved) => {
                        success(format!(
                            "Saved: Total Hours: {:.2}h, Total Earnings: {}",
                            saved.hours,
                            money(saved.earnings, &opts.currency)
                        ));
                        info(format!(
                            "{} total: {} | {}",
                            saved.date,
                            hours2readable(saved.total.total_hours),
                            money(saved.total.total_earnings, &opts.currency)
                        ));
                        on_save(&saved);
                    }
                    Err(e) => notice(&e),
                }
            }

            Action::Clear => {
                let elapsed = lock(&timer)?.elapsed_ms();
                if elapsed > 0
                    && !confirm_from("Discard the current session without saving?", input)
                {
                    info("Clear cancelled.");
                    continue;
                }

                if let Some(mut tk) = ticker.take() {
                    tk.cancel();
                }
                lock(&timer)?.clear();
                success("Clock cleared.");
            }

            Action::Status => {
                let t = lock(&timer)?;
                let state = if t.is_active() { "running" } else { "stopped" };
                let elapsed = t.elapsed_ms();
                drop(t);

                let (hours, earnings) = calc.increment(elapsed, Some(wage_cfg.wage()));
                info(format!(
                    "{} ({}) ≈ {:.2}h {}",
                    format_elapsed(elapsed),
                    state,
                    hours,
                    money(earnings, &opts.currency)
                ));
            }

            Action::Quit => break,
        }
    }

    if let Some(mut tk) = ticker.take() {
        tk.cancel();
    }

    let left = lock(&timer)?.elapsed_ms();
    if left > 0 {
        warning(format!("Unsaved time discarded: {}", format_elapsed(left)));
    }

    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock = cmd {
        let pool = open_db(&cfg.database)?;

        let opts = SessionOptions {
            currency: cfg.currency.clone(),
            tick_interval: io::stdout()
                .is_terminal()
                .then(|| Duration::from_millis(cfg.tick_interval_ms.max(50))),
        };

        let stdin = io::stdin();
        let mut input = stdin.lock();

        run_session(
            SessionTimer::new(SystemClock),
            &mut input,
            &pool.conn,
            cfg.calculator(),
            &opts,
            |saved| {
                audit(
                    &pool.conn,
                    "save",
                    &saved.date.to_string(),
                    &format!(
                        "+{:.4}h +{:.4} (wage {:.2})",
                        saved.hours, saved.earnings, saved.wage
                    ),
                )
            },
        )?;
    }

    Ok(())
}
