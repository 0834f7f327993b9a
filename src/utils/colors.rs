/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Amounts: positive → green, zero → grey.
pub fn color_for_amount(value: f64) -> &'static str {
    if value > 0.0 { GREEN } else { GREY }
}

/// Valore colorato: verde se positivo, grigio se zero.
pub fn colorize_amount(value: f64, text: &str) -> String {
    format!("{}{}{}", color_for_amount(value), text, RESET)
}
