use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::heatmap::PivotMatrix;
use super::timeline::AggregateRow;
use crate::models::Dataset;

/// Counts describing what one pipeline pass consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub samples_loaded: usize,
    pub samples_used: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub filter_open_hours: bool,
}

impl DatasetSummary {
    pub fn new(loaded: &Dataset, used: &Dataset, filter_open_hours: bool) -> Self {
        Self {
            rows_read: loaded.rows_read(),
            rows_dropped: loaded.rows_dropped(),
            samples_loaded: loaded.len(),
            samples_used: used.len(),
            first_timestamp: used.first_timestamp(),
            last_timestamp: used.last_timestamp(),
            filter_open_hours,
        }
    }
}

/// Both dashboard views plus the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyData {
    pub heatmap: PivotMatrix,
    pub timeline: Vec<AggregateRow>,
    pub summary: DatasetSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use chrono::NaiveDate;

    #[test]
    fn test_summary_from_datasets() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let loaded = Dataset::from_samples(vec![Sample::new(ts, 0.1), Sample::new(ts, 0.2)])
            .with_load_stats(3, 1);
        let used = loaded.retain_by(|s| s.occupancy > 0.15);

        let summary = DatasetSummary::new(&loaded, &used, true);
        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_dropped, 1);
        assert_eq!(summary.samples_loaded, 2);
        assert_eq!(summary.samples_used, 1);
        assert_eq!(summary.first_timestamp, Some(ts));
        assert!(summary.filter_open_hours);
    }
}
