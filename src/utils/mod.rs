pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;

pub use formatting::{hours2readable, money};
