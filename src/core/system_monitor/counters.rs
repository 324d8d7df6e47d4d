//! Counter-delta engine for cumulative network byte counters.

use serde::{Deserialize, Serialize};

use super::metrics::InterfaceCounters;

/// Received/sent byte pair, either cumulative totals or a per-interval delta
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub recv: u64,
    pub sent: u64,
}

impl Totals {
    pub fn new(recv: u64, sent: u64) -> Self {
        Self { recv, sent }
    }
}

/// Sum per-interface counters, skipping any interface named in `excluded`.
pub fn sum_interfaces(interfaces: &[InterfaceCounters], excluded: &[String]) -> Totals {
    interfaces
        .iter()
        .filter(|iface| !excluded.iter().any(|name| name == &iface.name))
        .fold(Totals::default(), |acc, iface| Totals {
            recv: acc.recv.saturating_add(iface.bytes_recv),
            sent: acc.sent.saturating_add(iface.bytes_sent),
        })
}

/// Tracks the previous cumulative totals and derives per-interval deltas.
#[derive(Debug, Clone, Default)]
pub struct CounterDelta {
    previous: Option<Totals>,
}

impl CounterDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed totals, `None` before the first observation
    pub fn baseline(&self) -> Option<Totals> {
        self.previous
    }

    /// Record `current` and return the delta since the previous observation.
    ///
    /// The first observation only stores the baseline and returns `None`.
    /// A counter that went backwards yields 0 for that direction. The baseline
    /// always moves to `current`.
    pub fn observe(&mut self, current: Totals) -> Option<Totals> {
        let delta = self.previous.map(|prev| Totals {
            recv: clamped_delta("received", prev.recv, current.recv),
            sent: clamped_delta("sent", prev.sent, current.sent),
        });

        self.previous = Some(current);
        delta
    }
}

fn clamped_delta(direction: &str, previous: u64, current: u64) -> u64 {
    match current.checked_sub(previous) {
        Some(delta) => delta,
        None => {
            log::warn!(
                "Network {} counter went backwards ({} -> {}), reporting 0",
                direction,
                previous,
                current
            );
            0
        }
    }
}
