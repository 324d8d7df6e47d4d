// Core business logic module

pub mod config;
pub mod system_monitor;
pub mod units;

// Re-export commonly used items
pub use config::{DashboardConfig, ProcessBackend};
pub use units::{celsius_to_fahrenheit, convert_bytes, format_bytes};
