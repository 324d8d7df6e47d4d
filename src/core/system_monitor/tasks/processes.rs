//! Process table sampling family.

use std::time::Duration;

use super::MetricFamily;
use crate::core::system_monitor::aggregation::normalize_cpu;
use crate::core::system_monitor::metrics::ProcessRecord;
use crate::core::system_monitor::source::ProcessSource;
use crate::core::system_monitor::views::DashboardState;
use crate::error::Result;

/// Samples the process table and hands it to the process view, which groups
/// and re-sorts it with the currently selected key.
///
/// Polling frequency: 1 second by default
pub struct ProcessFamily {
    source: Box<dyn ProcessSource>,
    interval: Duration,
}

impl ProcessFamily {
    pub fn new(source: Box<dyn ProcessSource>, interval: Duration) -> Self {
        Self { source, interval }
    }
}

impl MetricFamily for ProcessFamily {
    type Sample = Vec<ProcessRecord>;

    fn name(&self) -> &'static str {
        "process"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn sample(&mut self) -> Result<Vec<ProcessRecord>> {
        let mut records = self.source.processes()?;
        normalize_cpu(&mut records, self.source.cpu_count());
        Ok(records)
    }

    fn publish(&mut self, records: Vec<ProcessRecord>, state: &mut DashboardState) {
        state.processes.replace(records);
    }
}
