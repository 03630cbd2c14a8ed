//! Event Store statistics
//!
//! Size and lifetime counters for operator inspection.

use serde::Serialize;

/// Statistics about the Event Store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Records currently held
    pub len: usize,
    /// Configured capacity, `None` when unbounded
    pub capacity: Option<usize>,
    /// Records appended since startup
    pub appended_total: u64,
    /// Records discarded by FIFO eviction since startup
    pub evicted_total: u64,
}

impl StoreStats {
    /// Fraction of capacity in use, `None` when unbounded
    pub fn utilization(&self) -> Option<f64> {
        self.capacity.map(|cap| self.len as f64 / cap as f64)
    }
}
