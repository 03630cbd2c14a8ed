//! Integration tests for the event log and its series views
//!
//! Tests the store and aggregator through the public API:
//! - Capacity bound and FIFO eviction
//! - Snapshot isolation
//! - Cumulative and windowed series over store snapshots

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Duration, TimeZone, Utc};

use event_relay::aggregator::{build_cumulative, build_windowed, WindowOptions};
use event_relay::types::{EventRecord, TimeSeriesPoint};
use event_relay::{EventStore, SeriesRequest};

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::seconds(secs)
}

fn record(secs: i64, project: &str, tag: &str) -> EventRecord {
    EventRecord::at(ts(secs), project, tag, None)
}

#[test]
fn test_capacity_holds_after_every_append() {
    let store = EventStore::bounded(7);

    for i in 0..100 {
        store.append(record(i, "p", "t"));
        assert!(store.snapshot().len() <= 7);
    }
}

#[test]
fn test_fifo_keeps_last_records_in_order() {
    let max = 5;
    let store = EventStore::bounded(max);
    let all: Vec<EventRecord> = (0..12).map(|i| record(i, "p", &format!("t{}", i))).collect();

    for r in &all {
        store.append(r.clone());
    }

    assert_eq!(store.snapshot(), all[all.len() - max..].to_vec());
}

#[test]
fn test_snapshot_unchanged_by_later_appends() {
    let store = EventStore::bounded(3);
    store.append(record(1, "p", "a"));
    let snapshot = store.snapshot();

    store.append(record(2, "p", "b"));
    store.append(record(3, "p", "c"));
    store.append(record(4, "p", "d"));

    assert_eq!(snapshot, vec![record(1, "p", "a")]);
}

#[test]
fn test_eviction_then_cumulative_scenario() {
    let store = EventStore::bounded(3);
    let a = record(1, "p", "x");
    let b = record(2, "p", "x");
    let c = record(3, "p", "y");
    let d = record(4, "p", "x");

    for r in [&a, &b, &c, &d] {
        store.append(r.clone());
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot, vec![b.clone(), c, d.clone()]);

    let series = build_cumulative(&snapshot);
    assert_eq!(
        series["x"]["p"],
        vec![
            TimeSeriesPoint::new(b.timestamp.fixed_offset(), 1),
            TimeSeriesPoint::new(d.timestamp.fixed_offset(), 2),
        ]
    );
    assert_eq!(series["y"]["p"].len(), 1);
}

#[test]
fn test_two_hour_window_scenario() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let store = EventStore::unbounded();
    store.append(EventRecord::at(now - Duration::minutes(90), "p", "t", None));
    store.append(EventRecord::at(now - Duration::minutes(15), "p", "t", None));

    let options = WindowOptions::new(2, 60, 0).unwrap();
    let series = build_windowed(&store.snapshot(), &options, now);

    let points: Vec<(String, u64)> = series["p"]["t"]
        .iter()
        .map(|p| (p.key.format("%H:%M").to_string(), p.value))
        .collect();
    assert_eq!(
        points,
        vec![("10:00".to_string(), 1), ("11:00".to_string(), 1)]
    );
}

#[test]
fn test_cumulative_is_monotonic_per_group() {
    let store = EventStore::bounded(1000);
    // interleave groups and shuffle timestamps
    for i in 0..300 {
        let secs = (i * 7919) % 1000;
        let tag = ["open", "close", "click"][i as usize % 3];
        let project = ["web", "ios"][i as usize % 2];
        store.append(record(secs, project, tag));
    }

    for projects in build_cumulative(&store.snapshot()).values() {
        for points in projects.values() {
            for (i, point) in points.iter().enumerate() {
                assert_eq!(point.value, i as u64 + 1);
            }
            for pair in points.windows(2) {
                assert!(pair[0].key <= pair[1].key);
            }
        }
    }
}

#[test]
fn test_windowed_density_and_conservation() {
    let now = Utc.with_ymd_and_hms(2024, 6, 2, 9, 41, 0).unwrap();
    let options = WindowOptions::new(24, 60, 330).unwrap();
    let store = EventStore::unbounded();

    for i in 0..400 {
        let project = if i % 2 == 0 { "web" } else { "ios" };
        store.append(EventRecord::at(now - Duration::minutes(i * 5), project, "open", None));
    }

    let snapshot = store.snapshot();
    let series = build_windowed(&snapshot, &options, now);
    let window_start = options.window_start(now);
    let cutoff = now - Duration::hours(24);

    for (project, tags) in &series {
        let points = &tags["open"];
        assert_eq!(points.len(), options.bucket_count());
        assert_eq!(points[0].key, window_start);
        for pair in points.windows(2) {
            assert_eq!(pair[1].key - pair[0].key, options.bucket());
        }

        let expected = snapshot
            .iter()
            .filter(|r| &r.project == project)
            .filter(|r| r.timestamp >= cutoff && r.timestamp <= now)
            .count() as u64;
        let total: u64 = points.iter().map(|p| p.value).sum();
        assert_eq!(total, expected);
    }
}

#[test]
fn test_uneven_window_counts_only_trailing_hours() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let options = WindowOptions::new(1, 45, 0).unwrap();
    let store = EventStore::unbounded();
    store.append(EventRecord::at(now - Duration::minutes(80), "p", "t", None));
    store.append(EventRecord::at(now - Duration::minutes(20), "p", "t", None));
    store.append(EventRecord::at(now - Duration::minutes(85), "p", "stale", None));

    let series = build_windowed(&store.snapshot(), &options, now);

    let points = &series["p"]["t"];
    assert_eq!(points.len(), 2);
    assert_eq!(points.iter().map(|p| p.value).sum::<u64>(), 1);
    assert!(!series["p"].contains_key("stale"));
}

#[test]
fn test_empty_store_yields_empty_series() {
    let store = EventStore::default();
    let now = Utc::now();

    assert!(SeriesRequest::Cumulative.build(&store.snapshot(), now).is_empty());
    assert!(SeriesRequest::Windowed(WindowOptions::default())
        .build(&store.snapshot(), now)
        .is_empty());
}

#[test]
fn test_concurrent_ingest_and_aggregate() {
    let store = Arc::new(EventStore::bounded(200));
    let mut handles = vec![];

    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..250 {
                store.ingest(format!("p{}", t), "tick", None);
            }
        }));
    }

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..50 {
                let snapshot = store.snapshot();
                assert!(snapshot.len() <= 200);
                let series = build_cumulative(&snapshot);
                let counted: usize = series.values().flat_map(|p| p.values()).map(Vec::len).sum();
                assert_eq!(counted, snapshot.len());
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    let stats = store.stats();
    assert_eq!(stats.len, 200);
    assert_eq!(stats.appended_total, 1000);
    assert_eq!(stats.evicted_total, 800);
}
