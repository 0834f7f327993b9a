pub mod daily_total;
pub mod legacy_entry;
pub mod period;
pub mod series;
