//! Time-series output types

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A single chart point: time label and count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
    pub key: DateTime<FixedOffset>,
    pub value: u64,
}

impl TimeSeriesPoint {
    pub fn new(key: DateTime<FixedOffset>, value: u64) -> Self {
        Self { key, value }
    }
}

/// Cumulative view: tag -> project -> running totals
pub type CumulativeSeries = BTreeMap<String, BTreeMap<String, Vec<TimeSeriesPoint>>>;

/// Windowed view: project -> tag -> dense bucket counts
pub type WindowedSeries = BTreeMap<String, BTreeMap<String, Vec<TimeSeriesPoint>>>;
