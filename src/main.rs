//! wageclock main entrypoint.

use wageclock::run;
use wageclock::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
