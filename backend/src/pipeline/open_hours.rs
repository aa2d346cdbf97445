use chrono::{NaiveDateTime, NaiveTime, Timelike};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{Dataset, Weekday};

/// Half-open daily interval `[open, close)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    pub open: u16,
    pub close: u16,
}

impl DailyWindow {
    pub const fn new(open_hour: u16, close_hour: u16) -> Self {
        Self {
            open: open_hour * 60,
            close: close_hour * 60,
        }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        // Seconds are dropped: 17:59:30 falls in minute 17:59, before an 18:00 close.
        let minutes = (time.hour() * 60 + time.minute()) as u16;
        (self.open..self.close).contains(&minutes)
    }
}

/// Weekly opening schedule, one window per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenHours {
    windows: [DailyWindow; 7],
}

impl Default for OpenHours {
    /// Mon–Fri 07:00–23:00, Saturday 08:00–18:00, Sunday 08:00–23:00.
    fn default() -> Self {
        let weekday = DailyWindow::new(7, 23);
        Self {
            windows: [
                weekday,
                weekday,
                weekday,
                weekday,
                weekday,
                DailyWindow::new(8, 18),
                DailyWindow::new(8, 23),
            ],
        }
    }
}

impl OpenHours {
    pub fn new(windows: [DailyWindow; 7]) -> Self {
        Self { windows }
    }

    pub fn window(&self, weekday: Weekday) -> DailyWindow {
        self.windows[weekday.index()]
    }

    /// Whether the facility is open at `timestamp`.
    pub fn is_open(&self, timestamp: &NaiveDateTime) -> bool {
        self.window(Weekday::of(timestamp)).contains(timestamp.time())
    }

    /// Samples taken while the facility was open, in their original order.
    pub fn filter(&self, dataset: &Dataset) -> Dataset {
        let filtered = dataset.retain_by(|s| self.is_open(&s.timestamp));
        debug!(
            "Open-hours filter kept {} of {} samples",
            filtered.len(),
            dataset.len()
        );
        filtered
    }
}

/// Open-hours predicate for the facility's standard schedule.
pub fn is_open(timestamp: &NaiveDateTime) -> bool {
    OpenHours::default().is_open(timestamp)
}

/// Apply the standard schedule when `enabled`; otherwise pass the dataset through.
pub fn filter_open_hours(dataset: &Dataset, enabled: bool) -> Dataset {
    if enabled {
        OpenHours::default().filter(dataset)
    } else {
        dataset.clone()
    }
}
