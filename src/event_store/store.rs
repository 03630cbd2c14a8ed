//! Event Store - bounded in-memory event log
//!
//! The EventStore keeps the most recent events in insertion order and
//! discards the oldest one whenever an append would exceed capacity.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::types::EventRecord;

use super::stats::StoreStats;

/// Default number of records retained
pub const DEFAULT_MAX_LOGS: usize = 10_000;

struct Inner {
    records: VecDeque<EventRecord>,
    appended_total: u64,
    evicted_total: u64,
}

/// Append-only, capacity-bounded event log
///
/// All access goes through a single mutex, so appends and snapshots are
/// serialized and a snapshot never observes a half-applied eviction.
///
/// A store built with `capacity = None` never evicts. Memory then grows
/// with every ingested event for the lifetime of the process; prefer a
/// bounded capacity outside of short-lived tools.
pub struct EventStore {
    capacity: Option<usize>,
    inner: Mutex<Inner>,
}

impl EventStore {
    /// Create a store with the given capacity (`None` = unbounded)
    pub fn new(capacity: Option<usize>) -> Self {
        // Zero would evict every record as soon as it lands
        let capacity = capacity.map(|c| c.max(1));
        let initial = capacity.unwrap_or(0).min(DEFAULT_MAX_LOGS);

        Self {
            capacity,
            inner: Mutex::new(Inner {
                records: VecDeque::with_capacity(initial),
                appended_total: 0,
                evicted_total: 0,
            }),
        }
    }

    /// Create a store that retains at most `max_logs` records
    pub fn bounded(max_logs: usize) -> Self {
        Self::new(Some(max_logs))
    }

    /// Create a store that never evicts
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Configured capacity (`None` = unbounded)
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append a record, evicting the oldest one if capacity is exceeded
    pub fn append(&self, record: EventRecord) {
        let mut inner = self.inner.lock();
        inner.records.push_back(record);
        inner.appended_total += 1;

        if let Some(max) = self.capacity {
            if inner.records.len() > max {
                inner.records.pop_front();
                inner.evicted_total += 1;
            }
        }
    }

    /// Stamp a new record with the current time and append it
    pub fn ingest(
        &self,
        project: impl Into<String>,
        tag: impl Into<String>,
        extra: Option<String>,
    ) -> EventRecord {
        let record = EventRecord::new(project, tag, extra);
        self.append(record.clone());
        record
    }

    /// Point-in-time copy of the log, oldest first
    pub fn snapshot(&self) -> Vec<EventRecord> {
        let inner = self.inner.lock();
        inner.records.iter().cloned().collect()
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }

    /// Current size and lifetime counters
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        StoreStats {
            len: inner.records.len(),
            capacity: self.capacity,
            appended_total: inner.appended_total,
            evicted_total: inner.evicted_total,
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_LOGS)
    }
}
