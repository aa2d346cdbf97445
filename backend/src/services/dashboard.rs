//! Dashboard assembly: load, run the pipeline, shape the response.

use log::info;
use std::path::Path;

use super::cache::{load_cached, DatasetCache};
use super::render::{render_document, RenderOptions};
use crate::api::{OccupancyData, TimelineSeries, Weekday};
use crate::models::Dataset;
use crate::pipeline::{self, timeline_for, timeline_series, LoaderOptions, PipelineResult};

/// Run the pipeline over an already loaded dataset.
pub fn build_occupancy(dataset: &Dataset, filter_open: bool) -> PipelineResult<OccupancyData> {
    let output = pipeline::run(dataset, filter_open)?;
    Ok(OccupancyData {
        heatmap: output.heatmap,
        timeline: output.rows,
        summary: output.summary,
    })
}

/// Load `path` (through `cache` when given) and build both views.
pub fn load_occupancy(
    path: &Path,
    options: &LoaderOptions,
    filter_open: bool,
    cache: Option<&dyn DatasetCache>,
) -> PipelineResult<OccupancyData> {
    let dataset = load_cached(path, options, cache)?;
    let data = build_occupancy(&dataset, filter_open)?;
    info!(
        "Built dashboard from {}: {} samples, {} buckets",
        path.display(),
        data.summary.samples_used,
        data.heatmap.times.len()
    );
    Ok(data)
}

/// Timeline series to draw: a single weekday, or all seven.
pub fn select_series(data: &OccupancyData, weekday: Option<Weekday>) -> Vec<TimelineSeries> {
    match weekday {
        Some(weekday) => vec![TimelineSeries {
            weekday,
            points: timeline_for(&data.timeline, weekday),
        }],
        None => timeline_series(&data.timeline),
    }
}

/// Full HTML page for `data`.
pub fn render_dashboard(
    data: &OccupancyData,
    weekday: Option<Weekday>,
    opts: &RenderOptions,
) -> String {
    let series = select_series(data, weekday);
    render_document(&data.heatmap, &series, Some(&data.summary), opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use crate::pipeline::PipelineError;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let at = |day: u32, h: u32, m: u32| {
            NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap()
        };
        // 2024-01-01 is a Monday, 2024-01-03 a Wednesday
        Dataset::from_samples(vec![
            Sample::new(at(1, 7, 3), 0.5),
            Sample::new(at(1, 7, 8), 0.7),
            Sample::new(at(3, 12, 30), 0.2),
        ])
    }

    #[test]
    fn test_build_occupancy() {
        let data = build_occupancy(&dataset(), true).unwrap();
        assert_eq!(data.timeline.len(), 2);
        assert_eq!(data.heatmap.weekdays.len(), 7);
        assert_eq!(data.summary.samples_used, 3);
    }

    #[test]
    fn test_build_occupancy_empty() {
        let err = build_occupancy(&Dataset::default(), true).unwrap_err();
        assert!(matches!(err, PipelineError::NoSourceData));
    }

    #[test]
    fn test_select_series() {
        let data = build_occupancy(&dataset(), true).unwrap();
        let all = select_series(&data, None);
        assert_eq!(all.len(), 7);

        let wednesday = select_series(&data, Some(Weekday::Wednesday));
        assert_eq!(wednesday.len(), 1);
        assert_eq!(wednesday[0].points.len(), 1);
        assert_eq!(wednesday[0].points[0].bucket_label, "12:30");
    }

    #[test]
    fn test_render_dashboard_single_weekday() {
        let data = build_occupancy(&dataset(), true).unwrap();
        let html = render_dashboard(&data, Some(Weekday::Monday), &RenderOptions::default());
        assert!(html.contains("\"name\":\"Monday\""));
        assert!(!html.contains("\"name\":\"Wednesday\""));
    }
}
