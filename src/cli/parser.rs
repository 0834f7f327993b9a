use crate::export::ExportFormat;
use crate::models::period::{PeriodKind, WeekMode};
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for wageclock
/// CLI application to track work time and earnings with SQLite
#[derive(Parser)]
#[command(
    name = "wageclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal work clock: track sessions, turn time into earnings and report daily totals",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(
            long = "migrate",
            help = "Run pending migrations (folds legacy per-session entries into daily totals)"
        )]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show or set the hourly wage
    Wage {
        /// New hourly wage (a number greater than 0)
        value: Option<String>,
    },

    /// Run the interactive session clock (start / stop / save / clear / status / quit)
    Clock,

    /// Record a completed session without running the clock
    #[command(group(ArgGroup::new("duration").required(true).args(["ms", "minutes"])))]
    Save {
        /// Session length in milliseconds
        #[arg(long)]
        ms: Option<i64>,

        /// Session length in minutes
        #[arg(long)]
        minutes: Option<f64>,

        /// Date to book the session on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the stored total of one day
    Get {
        /// Date (YYYY-MM-DD or `today`)
        date: String,
    },

    /// Overwrite the earnings of one day (manual correction)
    Edit {
        /// Date (YYYY-MM-DD or `today`)
        date: String,

        /// New total earnings for the day
        earnings: String,

        /// New total hours (when omitted, hours are reset to 0)
        #[arg(long)]
        hours: Option<String>,
    },

    /// Delete one day or the whole ledger
    Del {
        /// Date (YYYY-MM-DD) to delete
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        date: Option<String>,

        #[arg(long = "all", help = "Delete every ledger entry (the wage setting is kept)")]
        all: bool,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List daily totals
    List {
        /// Filter by period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM              → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD           → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format, e.g. "2025-06:2025-08".
        /// Special value `all` shows the entire ledger (the default).
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "legacy", help = "List legacy per-session entries instead")]
        legacy: bool,
    },

    /// Earnings series for today's day, week or month
    Stats {
        #[arg(long, short, value_enum, default_value = "weekly")]
        period: PeriodKind,

        /// Weekly presentation: one bar per day or a single total (default from config)
        #[arg(long = "week-mode", value_enum)]
        week_mode: Option<WeekMode>,

        /// Reference day instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Import a JSON dump of the mobile app storage
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Export daily totals
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
