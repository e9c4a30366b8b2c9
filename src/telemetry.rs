//! Telemetry history, the rolling window of samples behind the dashboard chart.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of samples kept for charting.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// One recorded point on the telemetry chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub index: u64,
    pub rpm: i64,
    pub speed: i64,
}

/// Bounded, append-only sample history. The oldest sample is evicted once
/// the capacity is reached.
#[derive(Debug, Clone)]
pub struct TelemetryHistory {
    samples: VecDeque<TelemetrySample>,
    capacity: usize,
    next_index: u64,
}

impl TelemetryHistory {
    /// A zero capacity is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        TelemetryHistory {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            next_index: 0,
        }
    }

    /// Record a sample. The index keeps counting across evictions.
    pub fn push(&mut self, rpm: i64, speed: i64) -> TelemetrySample {
        let sample = TelemetrySample {
            index: self.next_index,
            rpm,
            speed,
        };
        self.next_index += 1;

        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        sample
    }

    /// Samples from oldest to newest.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &TelemetrySample> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index the next pushed sample will receive.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn to_vec(&self) -> Vec<TelemetrySample> {
        self.samples.iter().copied().collect()
    }
}

impl Default for TelemetryHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}
