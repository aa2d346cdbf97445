//! Public API surface for the occupancy backend.
//!
//! This file consolidates the DTO types shared by the pipeline, the HTTP API
//! and the HTML renderer. All types derive Serialize/Deserialize for JSON
//! serialization.

pub use crate::routes::dashboard::DatasetSummary;
pub use crate::routes::dashboard::OccupancyData;
pub use crate::routes::heatmap::PivotMatrix;
pub use crate::routes::timeline::AggregateRow;
pub use crate::routes::timeline::TimelineSeries;

pub use crate::models::{BucketKey, TimeBucket, Weekday};

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
