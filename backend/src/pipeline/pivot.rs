use std::collections::{BTreeSet, HashMap};

use crate::api::{AggregateRow, PivotMatrix};
use crate::models::{TimeBucket, Weekday};

/// Reshape aggregate rows into a weekday × time-bucket matrix.
///
/// Rows are always the seven weekdays in canonical order. Columns are the
/// observed buckets sorted by minutes since midnight. Cells with no aggregate
/// row are `None`.
pub fn pivot(rows: &[AggregateRow]) -> PivotMatrix {
    let times: Vec<TimeBucket> = rows
        .iter()
        .filter_map(|r| TimeBucket::from_minutes(r.minutes))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let column_of: HashMap<TimeBucket, usize> =
        times.iter().enumerate().map(|(i, t)| (*t, i)).collect();

    let mut values = vec![vec![None; times.len()]; Weekday::ALL.len()];
    for row in rows {
        let column = TimeBucket::from_minutes(row.minutes).and_then(|t| column_of.get(&t));
        if let Some(&col) = column {
            values[row.weekday.index()][col] = Some(row.avg_fill);
        }
    }

    PivotMatrix {
        weekdays: Weekday::ALL.to_vec(),
        times,
        values,
    }
}
