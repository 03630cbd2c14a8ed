//! Data types for the event relay
//!
//! This module contains the records kept by the event store and the
//! time-series shapes produced by the aggregator.

mod record;
mod series;

pub use record::EventRecord;
pub use series::{CumulativeSeries, TimeSeriesPoint, WindowedSeries};
