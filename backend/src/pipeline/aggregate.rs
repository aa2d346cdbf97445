use std::collections::BTreeMap;

use super::bucketing::{bucket_dataset, BucketedSample};
use crate::api::{AggregateRow, TimelineSeries};
use crate::models::{BucketKey, Dataset, Weekday};

/// Mean occupancy per `(weekday, bucket)` group.
///
/// Only observed groups produce a row. Rows come out in canonical weekday
/// order, then by minutes since midnight.
pub fn aggregate(samples: &[BucketedSample]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<BucketKey, Vec<f64>> = BTreeMap::new();
    for sample in samples {
        groups.entry(sample.key).or_default().push(sample.occupancy);
    }

    groups
        .into_iter()
        .map(|(key, mut values)| {
            // Summing in sorted order makes the mean independent of input order.
            values.sort_by(f64::total_cmp);
            let avg_fill = mean(&values);
            AggregateRow {
                weekday: key.weekday,
                bucket_label: key.label(),
                minutes: key.minutes(),
                avg_fill,
                samples: values.len(),
            }
        })
        .collect()
}

/// Arithmetic mean that stays finite for finite inputs near `f64::MAX`.
fn mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

/// Bucket and aggregate a dataset in one step.
pub fn aggregate_dataset(dataset: &Dataset) -> Vec<AggregateRow> {
    aggregate(&bucket_dataset(dataset))
}

/// Rows of one weekday, sorted by time of day.
pub fn timeline_for(rows: &[AggregateRow], weekday: Weekday) -> Vec<AggregateRow> {
    let mut points: Vec<AggregateRow> = rows
        .iter()
        .filter(|r| r.weekday == weekday)
        .cloned()
        .collect();
    points.sort_by_key(|r| r.minutes);
    points
}

/// One series per weekday in canonical order, empty weekdays included.
pub fn timeline_series(rows: &[AggregateRow]) -> Vec<TimelineSeries> {
    Weekday::ALL
        .iter()
        .map(|&weekday| TimelineSeries {
            weekday,
            points: timeline_for(rows, weekday),
        })
        .collect()
}
