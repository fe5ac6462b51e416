// src/load/mod.rs
//
// Both sinks overwrite whatever the previous run left behind.

pub mod csv_sink;
pub mod duck;

pub use csv_sink::{read_csv, write_csv};
pub use duck::{load_table, open_database};
