//! Daily statistics of patient inflammation data, and a small record of
//! patients, their observations and their doctors.

pub mod analysis;
pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod stats;
pub mod table;

pub use error::StatsError;
