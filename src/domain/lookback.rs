//! Lookback window: how many calendar days of history a run requests.

use chrono::{Duration, NaiveDate};

pub const MIN_LOOKBACK_DAYS: u32 = 30;
pub const MAX_LOOKBACK_DAYS: u32 = 180;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("lookback must be between 30 and 180 days, got {0}")]
pub struct LookbackOutOfRange(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    days: u32,
}

impl LookbackWindow {
    pub fn new(days: i64) -> Result<Self, LookbackOutOfRange> {
        if days < MIN_LOOKBACK_DAYS as i64 || days > MAX_LOOKBACK_DAYS as i64 {
            return Err(LookbackOutOfRange(days));
        }
        Ok(Self { days: days as u32 })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// `(start, end)` with `end` as given and `start = end - days`.
    pub fn date_range(&self, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        (end - Duration::days(self.days as i64), end)
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}
