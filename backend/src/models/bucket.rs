use chrono::Timelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Weekday;

/// Width of a time-of-day bucket, in minutes.
pub const BUCKET_MINUTES: u16 = 15;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A 15-minute slot of the day, identified by its start time.
///
/// Ordering and equality use the minutes-since-midnight value, never the
/// `"HH:MM"` label. Serialized as the label.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeBucket(u16);

impl TimeBucket {
    /// Floor a time of day to its bucket.
    pub fn from_time(time: chrono::NaiveTime) -> Self {
        let minutes = (time.hour() * 60 + time.minute()) as u16;
        Self(minutes - minutes % BUCKET_MINUTES)
    }

    /// Bucket starting at `minutes` past midnight.
    ///
    /// Returns `None` unless `minutes` is a multiple of 15 below 1440.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY && minutes % BUCKET_MINUTES == 0 {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight, a multiple of 15 in `[0, 1425]`.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// `"HH:MM"` label.
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time bucket label '{0}'")]
pub struct ParseBucketError(pub String);

impl FromStr for TimeBucket {
    type Err = ParseBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseBucketError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hours: u32 = h.parse().map_err(|_| err())?;
        let minutes: u32 = m.parse().map_err(|_| err())?;
        if hours >= 24 || minutes >= 60 {
            return Err(err());
        }
        Self::from_minutes((hours * 60 + minutes) as u16).ok_or_else(err)
    }
}

impl Serialize for TimeBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Grouping key of the aggregator: weekday plus time-of-day bucket.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub weekday: Weekday,
    pub bucket: TimeBucket,
}

impl BucketKey {
    pub fn new(weekday: Weekday, bucket: TimeBucket) -> Self {
        Self { weekday, bucket }
    }

    pub fn label(&self) -> String {
        self.bucket.label()
    }

    pub fn minutes(&self) -> u16 {
        self.bucket.minutes()
    }
}
