//! Windowed bucket-count series

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::{EventRecord, TimeSeriesPoint, WindowedSeries};

use super::WindowOptions;

/// Count events per fixed-width bucket over a trailing window
///
/// The window ends at `now` and is split into `options.bucket_count()`
/// buckets. Every (project, tag) group with at least one event inside the
/// window gets a dense series with one point per bucket, zero-filled.
/// Bucket labels are bucket starts shown in the display offset.
///
/// Only events in `[now - window, now]` are counted. When the window is not
/// a whole number of buckets the first bucket starts before the cutoff and
/// counts just its covered part.
///
/// The display offset shifts labels only: bucket membership is the same
/// whether computed in UTC or in the offset-adjusted clock.
pub fn build_windowed(
    records: &[EventRecord],
    options: &WindowOptions,
    now: DateTime<Utc>,
) -> WindowedSeries {
    let bucket_count = options.bucket_count();
    let bucket_secs = options.bucket().num_seconds();
    let window_start = options.window_start(now);
    let cutoff = options.window_cutoff(now);

    let mut counts: BTreeMap<(&str, &str), Vec<u64>> = BTreeMap::new();
    let mut in_window = 0usize;

    for record in records {
        if record.timestamp < cutoff || record.timestamp > now {
            continue;
        }

        let elapsed = (record.timestamp - window_start).num_seconds();
        // `now` itself belongs to the last bucket
        let index = ((elapsed / bucket_secs) as usize).min(bucket_count - 1);

        counts
            .entry((record.project.as_str(), record.tag.as_str()))
            .or_insert_with(|| vec![0; bucket_count])[index] += 1;
        in_window += 1;
    }

    let labels: Vec<_> = (0..bucket_count)
        .map(|i| (window_start + options.bucket() * i as i32).with_timezone(&options.offset()))
        .collect();

    let mut series = WindowedSeries::new();
    for ((project, tag), buckets) in counts {
        let points = labels
            .iter()
            .zip(buckets)
            .map(|(label, value)| TimeSeriesPoint::new(*label, value))
            .collect();

        series
            .entry(project.to_string())
            .or_default()
            .insert(tag.to_string(), points);
    }

    tracing::debug!(
        records = records.len(),
        in_window,
        buckets = bucket_count,
        "built windowed series"
    );
    series
}
