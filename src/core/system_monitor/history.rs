use std::collections::VecDeque;

use serde::Serialize;

pub const DEFAULT_HISTORY_SIZE: usize = 600;

/// Circular buffers for the received/sent rate series (for sparklines)
#[derive(Debug, Clone, Serialize)]
pub struct RateHistory {
    capacity: usize,
    pub recv: VecDeque<u64>,
    pub sent: VecDeque<u64>,
}

impl RateHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            recv: VecDeque::with_capacity(capacity),
            sent: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, recv: u64, sent: u64) {
        if self.recv.len() >= self.capacity {
            self.recv.pop_front();
            self.sent.pop_front();
        }
        self.recv.push_back(recv);
        self.sent.push_back(sent);
    }

    pub fn len(&self) -> usize {
        self.recv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recv.is_empty()
    }

    /// Most recent `n` received samples, oldest first
    pub fn recv_tail(&self, n: usize) -> Vec<u64> {
        Self::tail(&self.recv, n)
    }

    /// Most recent `n` sent samples, oldest first
    pub fn sent_tail(&self, n: usize) -> Vec<u64> {
        Self::tail(&self.sent, n)
    }

    fn tail(queue: &VecDeque<u64>, n: usize) -> Vec<u64> {
        let skip = queue.len().saturating_sub(n);
        queue.iter().skip(skip).copied().collect()
    }
}

impl Default for RateHistory {
    fn default() -> Self {
        Self::new()
    }
}
