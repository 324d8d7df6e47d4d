//! System monitoring core functionality.
//!
//! Samples network counters, the process table and temperature sensors on
//! independent timers, derives rates and aggregates, and publishes the results
//! behind a render gate.

pub mod aggregation;
pub mod counters;
pub mod gate;
mod history;
mod metrics;
pub mod ps_parser;
pub mod runtime;
pub mod sensors;
pub mod source;
pub mod tasks;
pub mod terminate;
pub mod views;

pub use aggregation::{group_by_command, normalize_cpu, sort_records};
pub use counters::{sum_interfaces, CounterDelta, Totals};
pub use gate::RenderGate;
pub use history::{RateHistory, DEFAULT_HISTORY_SIZE};
pub use metrics::{
    InterfaceCounters, ProcessRecord, RawSensorReading, SortKey, TemperatureMode,
    LIVE_INPUT_SUFFIX,
};
pub use ps_parser::{parse_line, parse_listing, ColumnLayout};
pub use runtime::{initial_state, MetricsRuntime, Sources};
pub use sensors::SensorFilter;
pub use source::{NetworkSource, ProcessSource, SensorSource};
pub use tasks::{run_tick, MetricFamily, NetworkFamily, ProcessFamily, TemperatureFamily};
pub use terminate::{terminate, TerminateTarget};
pub use views::{
    DashboardState, NetworkView, ProcessView, SensorRow, TemperatureView,
    DEFAULT_TEMP_THRESHOLD_CELSIUS,
};
