use serde::{Deserialize, Serialize};

use crate::models::Weekday;

// =========================================================
// Timeline types
// =========================================================

/// Mean occupancy of one observed `(weekday, bucket)` group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub weekday: Weekday,
    pub bucket_label: String, // "HH:MM", start of the 15-minute bucket
    pub minutes: u16,         // minutes since midnight, the sort key
    pub avg_fill: f64,
    pub samples: usize,
}

/// Timeline of a single weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSeries {
    pub weekday: Weekday,
    pub points: Vec<AggregateRow>,
}
