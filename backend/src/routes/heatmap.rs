use serde::{Deserialize, Serialize};

use crate::models::{TimeBucket, Weekday};

// =========================================================
// Heatmap types
// =========================================================

/// Weekday × time-of-day matrix of mean occupancy.
///
/// `values[row][col]` belongs to `weekdays[row]` and `times[col]`. A `None`
/// cell (JSON `null`) means no samples, which is distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotMatrix {
    pub weekdays: Vec<Weekday>,
    pub times: Vec<TimeBucket>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl PivotMatrix {
    /// Cell for a weekday and bucket, `None` when absent.
    pub fn get(&self, weekday: Weekday, bucket: TimeBucket) -> Option<f64> {
        let row = self.weekdays.iter().position(|d| *d == weekday)?;
        let col = self.times.binary_search(&bucket).ok()?;
        self.values.get(row)?.get(col).copied().flatten()
    }

    /// All cells of one weekday, in column order.
    pub fn row(&self, weekday: Weekday) -> &[Option<f64>] {
        self.weekdays
            .iter()
            .position(|d| *d == weekday)
            .and_then(|idx| self.values.get(idx))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Column labels as minutes since midnight.
    pub fn column_minutes(&self) -> Vec<u16> {
        self.times.iter().map(TimeBucket::minutes).collect()
    }

    pub fn column_labels(&self) -> Vec<String> {
        self.times.iter().map(TimeBucket::label).collect()
    }

    /// Copy of the matrix with every present value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Vec<Vec<Option<f64>>> {
        self.values
            .iter()
            .map(|row| row.iter().map(|v| v.map(|x| x * factor)).collect())
            .collect()
    }
}
