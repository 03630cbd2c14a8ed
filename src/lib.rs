//! Event Relay
//!
//! An analytics event relay: it accepts tagged events over plain GET
//! requests, forwards them to Mixpanel or PostHog, and keeps a bounded
//! in-memory history that can be inspected as a table or as charts.
//!
//! # Modules
//!
//! - `types`: Core data structures (EventRecord, TimeSeriesPoint)
//! - `event_store`: Bounded FIFO event log
//! - `aggregator`: Cumulative and windowed time-series views
//! - `forward`: Delivery to external analytics providers
//! - `config`: Environment configuration
//! - `api`: Axum router and REST handlers
//! - `utils`: Timezone offset helpers
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use event_relay::aggregator::{build_windowed, WindowOptions};
//! use event_relay::EventStore;
//!
//! let store = EventStore::bounded(100);
//! store.ingest("site", "signup", None);
//!
//! let series = build_windowed(&store.snapshot(), &WindowOptions::default(), Utc::now());
//! assert_eq!(series["site"]["signup"].len(), 24);
//! ```

pub mod aggregator;
pub mod api;
pub mod config;
pub mod event_store;
pub mod forward;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use aggregator::{build_cumulative, build_windowed, SeriesRequest, WindowOptions};
pub use config::RelayConfig;
pub use event_store::{EventStore, StoreStats};
pub use types::{CumulativeSeries, EventRecord, TimeSeriesPoint, WindowedSeries};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
