pub mod clock;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod get;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod save;
pub mod stats;
pub mod wage;
