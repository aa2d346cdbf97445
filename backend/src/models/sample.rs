use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{BucketKey, TimeBucket, Weekday};

/// One occupancy reading.
///
/// `occupancy` keeps the source convention (fraction or percentage) and is
/// never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub occupancy: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, occupancy: f64) -> Self {
        Self {
            timestamp,
            occupancy,
        }
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::of(&self.timestamp)
    }

    /// Bucket key of this sample's timestamp.
    pub fn bucket_key(&self) -> BucketKey {
        BucketKey::new(self.weekday(), TimeBucket::from_time(self.timestamp.time()))
    }
}

/// Chronologically ordered samples from one source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
    rows_read: usize,
    rows_dropped: usize,
}

impl Dataset {
    /// Build a dataset, sorting the samples by timestamp (stable).
    pub fn from_samples(mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        let rows_read = samples.len();
        Self {
            samples,
            rows_read,
            rows_dropped: 0,
        }
    }

    /// Attach load statistics gathered by the loader.
    pub fn with_load_stats(mut self, rows_read: usize, rows_dropped: usize) -> Self {
        self.rows_read = rows_read;
        self.rows_dropped = rows_dropped;
        self
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Data rows seen in the source (header excluded).
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Rows dropped because their occupancy value was not numeric.
    pub fn rows_dropped(&self) -> usize {
        self.rows_dropped
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Keep the samples matching `predicate`, preserving order and load stats.
    pub fn retain_by<F>(&self, mut predicate: F) -> Dataset
    where
        F: FnMut(&Sample) -> bool,
    {
        Dataset {
            samples: self.samples.iter().copied().filter(|s| predicate(s)).collect(),
            rows_read: self.rows_read,
            rows_dropped: self.rows_dropped,
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
