//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn money(value: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, value)
}

/// Fractional hours as `HHh MMm` (e.g. 1.5 → `01h 30m`).
pub fn hours2readable(hours: f64) -> String {
    let total_mins = (hours.max(0.0) * 60.0).round() as i64;
    format!("{:02}h {:02}m", total_mins / 60, total_mins % 60)
}

/// Clock display: `1h 2m 3s 45` (last field in hundredths of a second).
pub fn format_elapsed(ms: i64) -> String {
    let ms = ms.max(0);
    let centis = (ms % 1000) / 10;
    let seconds = (ms / 1000) % 60;
    let minutes = (ms / (1000 * 60)) % 60;
    let hours = ms / (1000 * 60 * 60);
    format!("{}h {}m {}s {:02}", hours, minutes, seconds, centis)
}
