//! Aggregator - time-series views over a store snapshot
//!
//! Both builders are pure functions of their inputs and hold no state
//! between calls. Results are not cached; the reporting path rebuilds them
//! from a fresh snapshot on every request.
//!
//! - `build_cumulative`: running totals per (tag, project)
//! - `build_windowed`: dense bucket counts per (project, tag) over a
//!   trailing window

mod cumulative;
mod windowed;

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::types::{CumulativeSeries, EventRecord, WindowedSeries};

pub use cumulative::build_cumulative;
pub use windowed::build_windowed;

/// Default trailing window in hours
pub const DEFAULT_WINDOW_HOURS: u32 = 24;
/// Default bucket width in minutes
pub const DEFAULT_BUCKET_MINUTES: u32 = 60;
/// Default display offset in minutes (+05:30)
pub const DEFAULT_TZ_OFFSET_MINUTES: i32 = 330;
/// Upper bound on buckets per series
pub const MAX_BUCKETS: usize = 10_000;

const MAX_OFFSET_MINUTES: u32 = 24 * 60 - 1;

/// Invalid windowed aggregation parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("window must be at least one hour")]
    EmptyWindow,
    #[error("bucket width must be at least one minute")]
    EmptyBucket,
    #[error("timezone offset {0} minutes is out of range")]
    OffsetOutOfRange(i32),
    #[error("{count} buckets requested, at most {max} allowed")]
    TooManyBuckets { count: usize, max: usize },
}

/// Validated parameters for windowed aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    window_hours: u32,
    bucket_minutes: u32,
    offset: FixedOffset,
}

impl WindowOptions {
    /// Validate window size, bucket width and display offset
    pub fn new(
        window_hours: u32,
        bucket_minutes: u32,
        tz_offset_minutes: i32,
    ) -> Result<Self, SeriesError> {
        if window_hours == 0 {
            return Err(SeriesError::EmptyWindow);
        }
        if bucket_minutes == 0 {
            return Err(SeriesError::EmptyBucket);
        }
        if tz_offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES {
            return Err(SeriesError::OffsetOutOfRange(tz_offset_minutes));
        }
        let offset = FixedOffset::east_opt(tz_offset_minutes * 60)
            .ok_or(SeriesError::OffsetOutOfRange(tz_offset_minutes))?;

        let options = Self {
            window_hours,
            bucket_minutes,
            offset,
        };
        let count = options.bucket_count();
        if count > MAX_BUCKETS {
            return Err(SeriesError::TooManyBuckets {
                count,
                max: MAX_BUCKETS,
            });
        }
        Ok(options)
    }

    pub fn window_hours(&self) -> u32 {
        self.window_hours
    }

    pub fn bucket_minutes(&self) -> u32 {
        self.bucket_minutes
    }

    /// Display offset in minutes east of UTC
    pub fn tz_offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn bucket(&self) -> Duration {
        Duration::minutes(i64::from(self.bucket_minutes))
    }

    /// `ceil(window * 60 / bucket)`
    pub fn bucket_count(&self) -> usize {
        let window_minutes = u64::from(self.window_hours) * 60;
        window_minutes.div_ceil(u64::from(self.bucket_minutes)) as usize
    }

    pub fn window(&self) -> Duration {
        Duration::hours(i64::from(self.window_hours))
    }

    /// Start of the first bucket for a window ending at `now`
    ///
    /// Earlier than `now - window` when the window is not a whole number
    /// of buckets; the first bucket is then only partly covered.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.bucket() * self.bucket_count() as i32
    }

    /// Oldest instant counted for a window ending at `now`
    pub fn window_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window()
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            bucket_minutes: DEFAULT_BUCKET_MINUTES,
            offset: FixedOffset::east_opt(DEFAULT_TZ_OFFSET_MINUTES * 60)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Which view the reporting path wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRequest {
    Cumulative,
    Windowed(WindowOptions),
}

/// Output of a [`SeriesRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SeriesOutput {
    Cumulative(CumulativeSeries),
    Windowed(WindowedSeries),
}

impl SeriesOutput {
    /// Number of top-level keys (tags or projects)
    pub fn len(&self) -> usize {
        match self {
            SeriesOutput::Cumulative(series) => series.len(),
            SeriesOutput::Windowed(series) => series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeriesRequest {
    /// Build the requested view from a snapshot
    pub fn build(&self, records: &[EventRecord], now: DateTime<Utc>) -> SeriesOutput {
        match self {
            SeriesRequest::Cumulative => SeriesOutput::Cumulative(build_cumulative(records)),
            SeriesRequest::Windowed(options) => {
                SeriesOutput::Windowed(build_windowed(records, options, now))
            }
        }
    }
}
