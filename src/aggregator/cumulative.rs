//! Cumulative running-total series

use std::collections::BTreeMap;

use crate::types::{CumulativeSeries, EventRecord, TimeSeriesPoint};

/// Build running totals per (tag, project)
///
/// Each group is ordered by timestamp with ties kept in insertion order,
/// so out-of-order appends still produce a monotonic series. Point `i`
/// carries the timestamp of the `i`-th event and the value `i + 1`.
pub fn build_cumulative(records: &[EventRecord]) -> CumulativeSeries {
    let mut groups: BTreeMap<(&str, &str), Vec<&EventRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.tag.as_str(), record.project.as_str()))
            .or_default()
            .push(record);
    }

    let mut series = CumulativeSeries::new();
    for ((tag, project), mut events) in groups {
        // sort_by_key is stable
        events.sort_by_key(|r| r.timestamp);

        let points: Vec<TimeSeriesPoint> = events
            .iter()
            .enumerate()
            .map(|(i, r)| TimeSeriesPoint::new(r.timestamp.fixed_offset(), i as u64 + 1))
            .collect();

        series
            .entry(tag.to_string())
            .or_default()
            .insert(project.to_string(), points);
    }

    tracing::debug!(records = records.len(), tags = series.len(), "built cumulative series");
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn record(secs: i64, project: &str, tag: &str, extra: Option<&str>) -> EventRecord {
        EventRecord::at(ts(secs), project, tag, extra.map(str::to_string))
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(build_cumulative(&[]).is_empty());
    }

    #[test]
    fn test_groups_by_tag_then_project() {
        let records = vec![
            record(1, "web", "login", None),
            record(2, "app", "login", None),
            record(3, "web", "logout", None),
            record(4, "web", "login", None),
        ];

        let series = build_cumulative(&records);

        assert_eq!(series.len(), 2);
        assert_eq!(series["login"]["web"].len(), 2);
        assert_eq!(series["login"]["app"].len(), 1);
        assert_eq!(series["logout"]["web"].len(), 1);
        assert!(!series["logout"].contains_key("app"));
    }

    #[test]
    fn test_values_increase_by_one() {
        let records: Vec<EventRecord> = (0..10).map(|i| record(i, "p", "t", None)).collect();
        let points = &build_cumulative(&records)["t"]["p"];

        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.value, i as u64 + 1);
            assert_eq!(point.key, ts(i as i64).fixed_offset());
        }
    }

    #[test]
    fn test_out_of_order_timestamps_are_resorted() {
        let records = vec![
            record(30, "p", "t", Some("late")),
            record(10, "p", "t", Some("early")),
            record(20, "p", "t", Some("middle")),
        ];

        let points = &build_cumulative(&records)["t"]["p"];
        let keys: Vec<_> = points.iter().map(|p| p.key).collect();

        assert_eq!(
            keys,
            vec![ts(10).fixed_offset(), ts(20).fixed_offset(), ts(30).fixed_offset()]
        );
        assert_eq!(points.last().map(|p| p.value), Some(3));
    }

    #[test]
    fn test_identical_input_is_deterministic() {
        let records = vec![
            record(1, "b", "y", None),
            record(1, "a", "x", None),
            record(2, "a", "y", None),
        ];

        let first = serde_json::to_string(&build_cumulative(&records)).unwrap();
        let second = serde_json::to_string(&build_cumulative(&records)).unwrap();
        assert_eq!(first, second);
    }
}
