//! Network sampling family.

use std::time::Duration;

use super::MetricFamily;
use crate::core::system_monitor::counters::{sum_interfaces, CounterDelta, Totals};
use crate::core::system_monitor::source::NetworkSource;
use crate::core::system_monitor::views::DashboardState;
use crate::error::Result;

/// Totals plus the per-second rate (absent on the first tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSample {
    pub totals: Totals,
    pub rate: Option<Totals>,
}

/// Sums interface counters and derives the recent rate.
///
/// Polling frequency: 1 second by default
pub struct NetworkFamily {
    source: Box<dyn NetworkSource>,
    excluded: Vec<String>,
    counters: CounterDelta,
    interval: Duration,
}

impl NetworkFamily {
    pub fn new(source: Box<dyn NetworkSource>, excluded: Vec<String>, interval: Duration) -> Self {
        Self {
            source,
            excluded,
            counters: CounterDelta::new(),
            interval,
        }
    }

    /// Delta over one interval, scaled to bytes per second
    fn per_second(&self, delta: Totals) -> Totals {
        let secs = self.interval.as_secs_f64();
        if secs <= 0.0 || (secs - 1.0).abs() < f64::EPSILON {
            return delta;
        }
        Totals {
            recv: (delta.recv as f64 / secs) as u64,
            sent: (delta.sent as f64 / secs) as u64,
        }
    }
}

impl MetricFamily for NetworkFamily {
    type Sample = NetworkSample;

    fn name(&self) -> &'static str {
        "network"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn sample(&mut self) -> Result<NetworkSample> {
        let interfaces = self.source.interface_counters()?;
        let totals = sum_interfaces(&interfaces, &self.excluded);
        let rate = self.counters.observe(totals).map(|delta| self.per_second(delta));

        Ok(NetworkSample { totals, rate })
    }

    fn publish(&mut self, sample: NetworkSample, state: &mut DashboardState) {
        state.network.publish(sample.totals, sample.rate);
    }
}
