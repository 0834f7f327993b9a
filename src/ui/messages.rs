use crate::errors::AppError;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt;
use std::io::{self, Write};

const BOLD: &str = "\x1b[1m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_CLOCK: &str = "⏱️";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", CYAN, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", RED, BOLD, ICON_ERR, RESET, msg);
}

/// Non-fatal report of a failed operation. Used where the session must go
/// on (the interactive clock): nothing is retried.
pub fn notice(e: &AppError) {
    if e.is_storage() {
        error(format!("{e} (nothing was changed, not retried)"));
    } else {
        error(e);
    }
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}====================== {}\n{}", CYAN, BOLD, msg, RESET);
}

/// Rewrite the current terminal line (running clock display).
pub fn status_line<T: fmt::Display>(msg: T) {
    print!("\r\x1b[2K{} {}", ICON_CLOCK, msg);
    let _ = io::stdout().flush();
}
