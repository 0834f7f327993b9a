use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};

/// Ask a yes/no confirmation, reading the answer from `input`.
pub fn confirm_from<R: BufRead>(prompt: &str, input: &mut R) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    match input.read_line(&mut s) {
        Ok(n) if n > 0 => matches!(s.trim().to_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

/// Ask a yes/no confirmation from the user on stdin.
pub fn ask_confirmation(prompt: &str) -> bool {
    confirm_from(prompt, &mut io::stdin().lock())
}
