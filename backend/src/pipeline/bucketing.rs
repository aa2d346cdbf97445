use chrono::{NaiveDateTime, NaiveTime};

use crate::models::{BucketKey, Dataset, TimeBucket, Weekday};

/// A sample reduced to its grouping key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketedSample {
    pub key: BucketKey,
    pub occupancy: f64,
}

/// Weekday and floor-truncated 15-minute bucket of a timestamp.
pub fn bucket_of(timestamp: &NaiveDateTime) -> BucketKey {
    BucketKey::new(Weekday::of(timestamp), TimeBucket::from_time(timestamp.time()))
}

/// Truncate a timestamp to the start of its 15-minute bucket (seconds cleared).
pub fn truncate_to_bucket(timestamp: &NaiveDateTime) -> NaiveDateTime {
    let bucket = TimeBucket::from_time(timestamp.time());
    let time = NaiveTime::from_hms_opt(bucket.hour() as u32, bucket.minute() as u32, 0)
        .unwrap_or(NaiveTime::MIN);
    timestamp.date().and_time(time)
}

/// Key every sample of the dataset.
pub fn bucket_dataset(dataset: &Dataset) -> Vec<BucketedSample> {
    dataset
        .iter()
        .map(|s| BucketedSample {
            key: bucket_of(&s.timestamp),
            occupancy: s.occupancy,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_bucket_of() {
        let key = bucket_of(&at(3, 18, 44, 10));
        assert_eq!(key.weekday, Weekday::Wednesday);
        assert_eq!(key.label(), "18:30");
        assert_eq!(key.minutes(), 18 * 60 + 30);
    }

    #[test]
    fn test_truncate_to_bucket() {
        assert_eq!(truncate_to_bucket(&at(1, 7, 7, 0)), at(1, 7, 0, 0));
        assert_eq!(truncate_to_bucket(&at(1, 7, 22, 45)), at(1, 7, 15, 0));
        assert_eq!(truncate_to_bucket(&at(1, 0, 14, 59)), at(1, 0, 0, 0));
    }

    #[test]
    fn test_bucket_dataset_preserves_values() {
        let ds = Dataset::from_samples(vec![
            Sample::new(at(1, 7, 3, 0), 0.5),
            Sample::new(at(1, 7, 16, 0), 0.7),
        ]);
        let bucketed = bucket_dataset(&ds);
        assert_eq!(bucketed.len(), 2);
        assert_eq!(bucketed[0].key.label(), "07:00");
        assert_eq!(bucketed[1].key.label(), "07:15");
        assert_eq!(bucketed[1].occupancy, 0.7);
    }

    proptest! {
        #[test]
        fn prop_truncation_is_idempotent(day in 1u32..=7, slot in 0u32..96) {
            let on_boundary = at(day, slot / 4, (slot % 4) * 15, 0);
            prop_assert_eq!(truncate_to_bucket(&on_boundary), on_boundary);
            prop_assert_eq!(bucket_of(&on_boundary).minutes() as u32, slot * 15);
        }

        #[test]
        fn prop_minutes_is_multiple_of_fifteen(minute in 0u32..1440, sec in 0u32..60) {
            let key = bucket_of(&at(2, minute / 60, minute % 60, sec));
            prop_assert_eq!(key.minutes() % 15, 0);
            prop_assert!(key.minutes() <= 1425);
            prop_assert!(key.minutes() as u32 <= minute);
            prop_assert!((minute - key.minutes() as u32) < 15);
        }

        #[test]
        fn prop_label_round_trips_to_minutes(minute in 0u32..1440) {
            let key = bucket_of(&at(4, minute / 60, minute % 60, 0));
            let parsed: TimeBucket = key.label().parse().unwrap();
            prop_assert_eq!(parsed.minutes(), key.minutes());
        }
    }
}
