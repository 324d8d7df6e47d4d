//! Published per-family state.
//!
//! Each sampling task writes only its own view; the renderer reads all of them
//! through the shared [`RenderGate`](super::gate::RenderGate).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregation::{group_by_command, sort_records};
use super::counters::Totals;
use super::history::RateHistory;
use super::metrics::{ProcessRecord, SortKey, TemperatureMode};
use super::terminate::TerminateTarget;
use crate::core::units::{celsius_to_fahrenheit, convert_bytes};

pub const SORT_MARKER: &str = "▼";

/// Everything the renderer may read
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub network: NetworkView,
    pub processes: ProcessView,
    pub temperatures: TemperatureView,
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkView {
    /// Bytes per second, oldest first
    pub history: RateHistory,
    pub totals: Totals,
    pub recent: Option<Totals>,
    pub recv_total_title: String,
    pub recv_rate_title: String,
    pub sent_total_title: String,
    pub sent_rate_title: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NetworkView {
    pub fn with_history(capacity: usize) -> Self {
        Self {
            history: RateHistory::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Publish new cumulative totals and, after the first tick, the per-second rate.
    pub fn publish(&mut self, totals: Totals, rate: Option<Totals>) {
        if let Some(rate) = rate {
            self.history.push(rate.recv, rate.sent);
        }
        self.totals = totals;
        self.recent = rate;

        let rate = rate.unwrap_or_default();
        self.recv_total_title = total_title("RX", totals.recv);
        self.recv_rate_title = rate_title("RX", rate.recv);
        self.sent_total_title = total_title("TX", totals.sent);
        self.sent_rate_title = rate_title("TX", rate.sent);
        self.updated_at = Some(Utc::now());
    }
}

fn total_title(label: &str, bytes: u64) -> String {
    let (value, unit) = convert_bytes(bytes);
    format!(" Total {}: {:5.1} {}", label, value, unit)
}

fn rate_title(label: &str, bytes_per_sec: u64) -> String {
    let (value, unit) = convert_bytes(bytes_per_sec);
    format!(" {}/s: {:9.1} {:>2}/s", label, value, unit)
}

// ---------------------------------------------------------------------------
// Processes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ProcessView {
    sort_key: SortKey,
    grouped: bool,
    #[serde(skip)]
    ungrouped_records: Vec<ProcessRecord>,
    #[serde(skip)]
    grouped_records: Vec<ProcessRecord>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column that identifies a row: the command name when grouped, the PID otherwise
    pub unique_col: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ProcessView {
    fn default() -> Self {
        Self::new(SortKey::default(), true)
    }
}

impl ProcessView {
    pub fn new(sort_key: SortKey, grouped: bool) -> Self {
        let mut view = Self {
            sort_key,
            grouped,
            ungrouped_records: Vec::new(),
            grouped_records: Vec::new(),
            header: Vec::new(),
            rows: Vec::new(),
            unique_col: 0,
            updated_at: None,
        };
        view.sort();
        view
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Records backing the current view, in display order
    pub fn records(&self) -> &[ProcessRecord] {
        if self.grouped {
            &self.grouped_records
        } else {
            &self.ungrouped_records
        }
    }

    /// Replace the snapshot with freshly sampled records and re-sort.
    pub fn replace(&mut self, records: Vec<ProcessRecord>) {
        self.grouped_records = group_by_command(&records);
        self.ungrouped_records = records;
        self.sort();
        self.updated_at = Some(Utc::now());
    }

    /// Change the sort key. Returns true if the key actually changed.
    pub fn set_sort_key(&mut self, key: SortKey) -> bool {
        if self.sort_key == key {
            return false;
        }
        self.sort_key = key;
        self.sort();
        true
    }

    /// Switch between the grouped and ungrouped view.
    pub fn toggle_grouped(&mut self) {
        self.grouped = !self.grouped;
        self.sort();
    }

    /// What terminating row `row` would target
    pub fn kill_target(&self, row: usize) -> Option<TerminateTarget> {
        let record = self.records().get(row)?;
        Some(if self.grouped {
            TerminateTarget::Name(record.command_name.clone())
        } else {
            TerminateTarget::Pid(record.pid)
        })
    }

    fn sort(&mut self) {
        let grouped = self.grouped;
        let records = if grouped {
            &mut self.grouped_records
        } else {
            &mut self.ungrouped_records
        };
        sort_records(records, self.sort_key, grouped);

        let mut header = vec![
            if grouped { "Count" } else { "PID" }.to_string(),
            "Command".to_string(),
            "CPU%".to_string(),
            "Mem%".to_string(),
        ];
        let sorted_col = match self.sort_key {
            SortKey::Pid => 0,
            SortKey::Cpu => 2,
            SortKey::Memory => 3,
        };
        header[sorted_col].push_str(SORT_MARKER);

        self.header = header;
        self.unique_col = if grouped { 1 } else { 0 };
        self.rows = records_to_rows(self.records(), grouped);
    }
}

/// Convert records to display strings: id/count, command, CPU%, Mem%
pub fn records_to_rows(records: &[ProcessRecord], grouped: bool) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            vec![
                record.pid.to_string(),
                if grouped {
                    record.command_name.clone()
                } else {
                    record.full_command.clone()
                },
                format!("{:>4}", format!("{:.1}", record.cpu_percent)),
                format!("{:>4}", format!("{:.1}", record.mem_percent)),
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Temperatures
// ---------------------------------------------------------------------------

pub const DEFAULT_TEMP_THRESHOLD_CELSIUS: i32 = 80;

/// One rendered sensor line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorRow {
    pub label: String,
    pub value: i32,
    pub alert: bool,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureView {
    mode: TemperatureMode,
    /// Alert threshold in the view's unit
    threshold: i32,
    #[serde(skip)]
    readings: BTreeMap<String, i32>,
    pub rows: Vec<SensorRow>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for TemperatureView {
    fn default() -> Self {
        Self::new(TemperatureMode::Celsius, DEFAULT_TEMP_THRESHOLD_CELSIUS)
    }
}

impl TemperatureView {
    /// `threshold_celsius` is converted to the view's unit once, here.
    pub fn new(mode: TemperatureMode, threshold_celsius: i32) -> Self {
        let threshold = match mode {
            TemperatureMode::Celsius => threshold_celsius,
            TemperatureMode::Fahrenheit => celsius_to_fahrenheit(threshold_celsius),
        };
        Self {
            mode,
            threshold,
            readings: BTreeMap::new(),
            rows: Vec::new(),
            updated_at: None,
        }
    }

    pub fn mode(&self) -> TemperatureMode {
        self.mode
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Mutable access to the label->value map; call [`Self::refresh_rows`] afterwards.
    pub fn readings_mut(&mut self) -> &mut BTreeMap<String, i32> {
        &mut self.readings
    }

    pub fn refresh_rows(&mut self) {
        let unit = self.mode.unit_letter();
        self.rows = self
            .readings
            .iter()
            .map(|(label, &value)| SensorRow {
                label: label.clone(),
                value,
                alert: value >= self.threshold,
                display: format!("{:3}{}", value, unit),
            })
            .collect();
        self.updated_at = Some(Utc::now());
    }
}
