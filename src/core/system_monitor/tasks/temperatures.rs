//! Temperature sampling family.

use std::time::Duration;

use super::MetricFamily;
use crate::core::system_monitor::sensors::SensorFilter;
use crate::core::system_monitor::source::SensorSource;
use crate::core::system_monitor::views::DashboardState;
use crate::error::Result;

/// Polling frequency: 5 seconds by default (sensors update slowly)
pub struct TemperatureFamily {
    source: Box<dyn SensorSource>,
    filter: SensorFilter,
    interval: Duration,
}

impl TemperatureFamily {
    pub fn new(source: Box<dyn SensorSource>, filter: SensorFilter, interval: Duration) -> Self {
        Self {
            source,
            filter,
            interval,
        }
    }
}

impl MetricFamily for TemperatureFamily {
    /// Live readings as (label, degrees in the configured unit)
    type Sample = Vec<(String, i32)>;

    fn name(&self) -> &'static str {
        "temperature"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn sample(&mut self) -> Result<Vec<(String, i32)>> {
        let readings = self.source.sensor_readings()?;
        Ok(self.filter.convert_all(&readings))
    }

    fn publish(&mut self, readings: Vec<(String, i32)>, state: &mut DashboardState) {
        let view = &mut state.temperatures;
        // Labels persist across ticks; a later reading for the same label wins
        view.readings_mut().extend(readings);
        view.refresh_rows();
    }
}
