//! Worker pool and queue configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_QUEUE_CAPACITY};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Requested number of scoring workers. Default: hardware concurrency.
    /// The pipeline caps this at the hardware concurrency.
    pub parallelism: Option<usize>,
    /// Work queue capacity. Default: 1000.
    pub queue_capacity: Option<usize>,
    /// Poll interval for queue reads and completion waits. Default: 100ms.
    pub poll_interval_ms: Option<u64>,
}

impl RuntimeConfig {
    /// Returns the requested parallelism, defaulting to the hardware concurrency.
    pub fn requested_parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(hardware_concurrency)
    }

    pub fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn effective_poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }
}

/// Number of hardware threads, or 1 if it cannot be determined.
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
