// src/lib.rs

pub mod config;
pub mod extract;
pub mod fetch;
pub mod load;
pub mod pipeline;
pub mod progress;
pub mod query;
pub mod table;
pub mod transform;
