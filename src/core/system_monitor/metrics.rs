use serde::{Deserialize, Serialize};

/// Cumulative byte counters for one network interface, as reported by the OS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceCounters {
    pub name: String,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}

/// One row of the process table.
///
/// In the grouped view `pid` holds the number of processes sharing
/// `command_name`, `full_command` is empty and the percentages are sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub command_name: String,
    pub full_command: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
}

/// A raw sensor entry. Only keys ending in [`LIVE_INPUT_SUFFIX`] carry a live reading;
/// the rest are thresholds and other metadata from the same enumeration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSensorReading {
    pub key: String,
    pub temperature: f32,
}

pub const LIVE_INPUT_SUFFIX: &str = "_input";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureMode {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureMode {
    pub fn unit_letter(self) -> char {
        match self {
            TemperatureMode::Celsius => 'C',
            TemperatureMode::Fahrenheit => 'F',
        }
    }
}

/// Process table sort key.
///
/// CPU and memory always sort descending. `Pid` sorts descending by member count
/// in the grouped view and ascending by PID in the ungrouped view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Cpu,
    Memory,
    Pid,
}
