use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::error::{PipelineError, PipelineResult};
use crate::models::{Dataset, Sample};

/// Default name of the timestamp column.
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "Timestamp";
/// Default name of the occupancy column.
pub const DEFAULT_OCCUPANCY_COLUMN: &str = "percent_filled";

/// Naive date-time layouts accepted for the timestamp column, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Column names used to locate the two required fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoaderOptions {
    pub timestamp_column: String,
    pub occupancy_column: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            occupancy_column: DEFAULT_OCCUPANCY_COLUMN.to_string(),
        }
    }
}

impl LoaderOptions {
    pub fn new(timestamp_column: impl Into<String>, occupancy_column: impl Into<String>) -> Self {
        Self {
            timestamp_column: timestamp_column.into(),
            occupancy_column: occupancy_column.into(),
        }
    }
}

/// Loads occupancy samples from CSV sources.
pub struct SampleLoader;

impl SampleLoader {
    /// Load a dataset from a CSV file on disk.
    pub fn load_from_file(path: &Path, options: &LoaderOptions) -> PipelineResult<Dataset> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::io(path, e))?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::load_from_bytes(&bytes, options)
    }

    /// Load a dataset from in-memory CSV content.
    pub fn load_from_bytes(bytes: &[u8], options: &LoaderOptions) -> PipelineResult<Dataset> {
        Self::load_from_reader(bytes, options)
    }

    /// Load a dataset from a CSV string.
    pub fn load_from_str(content: &str, options: &LoaderOptions) -> PipelineResult<Dataset> {
        Self::load_from_reader(content.as_bytes(), options)
    }

    /// Load a dataset from any reader producing CSV text with a header row.
    pub fn load_from_reader<R: Read>(reader: R, options: &LoaderOptions) -> PipelineResult<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        let header_map = build_header_map(&headers);

        let ts_idx = find_column(&header_map, &options.timestamp_column)
            .ok_or_else(|| PipelineError::missing_column(&options.timestamp_column, &headers))?;
        let occ_idx = find_column(&header_map, &options.occupancy_column)
            .ok_or_else(|| PipelineError::missing_column(&options.occupancy_column, &headers))?;

        let mut samples = Vec::new();
        let mut rows_read = 0usize;
        let mut rows_dropped = 0usize;

        for record in reader.records() {
            let record = record?;
            // Whitespace-only lines trim down to empty records
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows_read += 1;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let raw_ts = record.get(ts_idx).unwrap_or("");
            let timestamp = parse_timestamp(raw_ts)
                .ok_or_else(|| PipelineError::invalid_timestamp(line, raw_ts))?;

            match record.get(occ_idx).and_then(parse_occupancy) {
                Some(occupancy) => samples.push(Sample::new(timestamp, occupancy)),
                None => {
                    rows_dropped += 1;
                    debug!("Dropping row on line {}: non-numeric occupancy", line);
                }
            }
        }

        if rows_dropped > 0 {
            warn!(
                "Dropped {} of {} rows with non-numeric '{}' values",
                rows_dropped, rows_read, options.occupancy_column
            );
        }
        info!("Loaded {} samples from {} rows", samples.len(), rows_read);

        Ok(Dataset::from_samples(samples).with_load_stats(rows_read, rows_dropped))
    }
}

/// Parse a timestamp cell as naive local date-time.
///
/// RFC 3339 values keep their wall-clock time and drop the offset. A bare date
/// maps to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Coerce an occupancy cell to a finite number. Anything else is `None`.
pub fn parse_occupancy(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn build_header_map(headers: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        map.entry(name.clone()).or_insert(idx);
    }
    map
}

/// Exact match first, then an ASCII case-insensitive match.
fn find_column(header_map: &HashMap<String, usize>, wanted: &str) -> Option<usize> {
    let wanted = wanted.trim();
    if let Some(idx) = header_map.get(wanted) {
        return Some(*idx);
    }
    header_map
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case(wanted))
        .map(|(_, idx)| *idx)
        .min()
}
