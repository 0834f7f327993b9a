pub mod aggregate;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod import;
pub mod ledger;
pub mod log;
pub mod ticker;
pub mod timer;
pub mod wage;
