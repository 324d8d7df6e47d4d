//! Periodic sampling tasks.
//!
//! Each metric family runs in its own task on its own interval. A tick samples
//! the OS source outside the gate, then publishes into the shared
//! [`DashboardState`] with write-intent held.

mod network;
mod processes;
mod temperatures;

pub use network::NetworkFamily;
pub use processes::ProcessFamily;
pub use temperatures::TemperatureFamily;

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use super::gate::RenderGate;
use super::views::DashboardState;
use crate::error::Result;

/// One independently sampled metric family.
pub trait MetricFamily: Send + 'static {
    /// Transformed data ready to publish
    type Sample: Send;

    fn name(&self) -> &'static str;

    fn interval(&self) -> Duration;

    /// Query the source and transform the raw data. Runs without the gate.
    fn sample(&mut self) -> Result<Self::Sample>;

    /// Write `sample` into this family's view. Runs with write-intent held.
    fn publish(&mut self, sample: Self::Sample, state: &mut DashboardState);
}

/// Run one sample/publish cycle. Returns false if the tick was skipped.
///
/// On a source error the previously published state stays untouched.
pub fn run_tick<F: MetricFamily>(family: &mut F, gate: &RenderGate<DashboardState>) -> bool {
    match family.sample() {
        Ok(sample) => {
            gate.write(|state| family.publish(sample, state));
            log::trace!("{} metrics published", family.name());
            true
        }
        Err(e) => {
            log::warn!(
                "Failed to sample {} metrics, keeping previous data: {}",
                family.name(),
                e
            );
            false
        }
    }
}

/// Drive `family` on its interval until shutdown.
///
/// The first tick fires immediately. A tick that overruns the interval delays
/// the next one; ticks of one family never overlap.
pub async fn periodic_task<F: MetricFamily>(
    mut family: F,
    gate: RenderGate<DashboardState>,
    mut shutdown: broadcast::Receiver<()>,
) {
    log::info!("{} sampling task started", family.name());

    let mut ticker = interval(family.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_tick(&mut family, &gate);
            }
            _ = shutdown.recv() => {
                log::info!("{} sampling task shutting down", family.name());
                break;
            }
        }
    }
}
