//! Error types for the occupancy pipeline.
//!
//! The taxonomy follows the pipeline stages: fatal source errors abort the load,
//! recoverable row defects never surface here (they are counted on the
//! [`Dataset`](crate::models::Dataset)), and the two empty-result variants are
//! reported after filtering and before aggregation.

use std::path::PathBuf;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The source file could not be read.
    #[error("Failed to read source '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input (malformed quoting, bad UTF-8, ...).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing column '{column}' (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A timestamp cell could not be parsed. Aborts the whole load.
    #[error("Unparsable timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: u64, value: String },

    /// The source held no valid samples.
    #[error("No data in source. Check the CSV path and its occupancy column.")]
    NoSourceData,

    /// Every sample was removed by the open-hours filter.
    #[error("No data after filtering open hours ({total} samples were outside opening times).")]
    AllFilteredOut { total: usize },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(column: impl Into<String>, available: &[String]) -> Self {
        Self::MissingColumn {
            column: column.into(),
            available: available.to_vec(),
        }
    }

    pub fn invalid_timestamp(line: u64, value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            line,
            value: value.into(),
        }
    }

    /// Whether this is one of the "nothing to display" conditions.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::NoSourceData | Self::AllFilteredOut { .. })
    }

    /// Whether the source file itself is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_messages_are_distinct() {
        let none = PipelineError::NoSourceData;
        let filtered = PipelineError::AllFilteredOut { total: 4 };
        assert!(none.is_empty_result());
        assert!(filtered.is_empty_result());
        assert_ne!(none.to_string(), filtered.to_string());
        assert!(filtered.to_string().contains("filtering open hours"));
    }

    #[test]
    fn test_missing_column_lists_available() {
        let err = PipelineError::missing_column(
            "percent_filled",
            &["Timestamp".to_string(), "count".to_string()],
        );
        let msg = err.to_string();
        assert!(msg.contains("percent_filled"));
        assert!(msg.contains("Timestamp, count"));
        assert!(!err.is_empty_result());
    }

    #[test]
    fn test_not_found_detection() {
        let err = PipelineError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.is_not_found());
        assert!(!PipelineError::NoSourceData.is_not_found());
    }

    #[test]
    fn test_invalid_timestamp_display() {
        let err = PipelineError::invalid_timestamp(7, "yesterday");
        assert_eq!(err.to_string(), "Unparsable timestamp 'yesterday' on line 7");
    }
}
