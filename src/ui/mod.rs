// UI and formatting module

pub mod monitor_tui;
