//! Occupancy data pipeline.
//!
//! ```text
//! Loader → Open-Hours Filter (optional) → Bucketer → Aggregator → Pivoter
//!                                                        │
//!                                                        └──→ timeline rows
//! ```
//!
//! Every stage is a plain function over owned or borrowed data with no global
//! state. [`run`] chains the stages after loading and enforces the
//! empty-result checks between filtering and aggregation.
//!
//! # Example
//!
//! ```no_run
//! use rsf_occupancy::pipeline::{self, LoaderOptions, SampleLoader};
//! use std::path::Path;
//!
//! let dataset = SampleLoader::load_from_file(Path::new("scraped_data2.csv"), &LoaderOptions::default())
//!     .expect("Failed to load");
//! let output = pipeline::run(&dataset, true).expect("No data to display");
//! println!("{} buckets observed", output.heatmap.times.len());
//! ```

pub mod aggregate;
pub mod bucketing;
pub mod error;
pub mod loader;
pub mod open_hours;
pub mod pivot;


pub use aggregate::{aggregate, aggregate_dataset, timeline_for, timeline_series};
pub use bucketing::{bucket_dataset, bucket_of, truncate_to_bucket, BucketedSample};
pub use error::{PipelineError, PipelineResult};
pub use loader::{parse_occupancy, parse_timestamp, LoaderOptions, SampleLoader};
pub use open_hours::{filter_open_hours, is_open, DailyWindow, OpenHours};
pub use pivot::pivot;

use log::{debug, warn};

use crate::api::{AggregateRow, DatasetSummary, PivotMatrix};
use crate::models::Dataset;

/// Tables produced by one pass of the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Flat aggregate, canonical weekday order then time of day.
    pub rows: Vec<AggregateRow>,
    /// Weekday × bucket matrix for the heatmap.
    pub heatmap: PivotMatrix,
    pub summary: DatasetSummary,
}

/// Filter, bucket, aggregate and pivot a loaded dataset.
///
/// # Errors
/// - [`PipelineError::NoSourceData`] if `dataset` is empty.
/// - [`PipelineError::AllFilteredOut`] if the open-hours filter removes every sample.
pub fn run(dataset: &Dataset, filter_open: bool) -> PipelineResult<PipelineOutput> {
    if dataset.is_empty() {
        warn!("Source has no valid samples");
        return Err(PipelineError::NoSourceData);
    }

    let filtered = filter_open_hours(dataset, filter_open);
    if filtered.is_empty() {
        warn!("All {} samples fall outside opening hours", dataset.len());
        return Err(PipelineError::AllFilteredOut {
            total: dataset.len(),
        });
    }

    let rows = aggregate_dataset(&filtered);
    let heatmap = pivot(&rows);
    debug!(
        "Aggregated {} samples into {} rows across {} buckets",
        filtered.len(),
        rows.len(),
        heatmap.times.len()
    );

    Ok(PipelineOutput {
        summary: DatasetSummary::new(dataset, &filtered, filter_open),
        rows,
        heatmap,
    })
}
