//! Event Store Module
//!
//! This module provides the bounded in-memory event log:
//! - `EventStore`: append-only FIFO log with a capacity bound
//! - `StoreStats`: size and lifetime counters
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌─────────┐    ┌───────────┐    ┌─────────────────────┐
//! │ /mp /ph │───►│ ingest()  │───►│ pop oldest if > MAX │
//! │ request │    │ push_back │    │ (single eviction)   │
//! └─────────┘    └───────────┘    └─────────────────────┘
//!
//! Read Path:
//! ┌────────────┐    ┌──────────────┐
//! │ snapshot() │───►│ aggregator   │───► series JSON
//! │ (copy)     │    │ (pure)       │
//! └────────────┘    └──────────────┘
//! ```

mod stats;
mod store;

pub use stats::StoreStats;
pub use store::{EventStore, DEFAULT_MAX_LOGS};
