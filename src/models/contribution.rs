use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of activity as reported by the contribution feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub count: u32,
    /// Quantized bucket of `count` (0..=4) chosen by the feed. Display only.
    #[serde(default)]
    pub level: u8,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, count: u32, level: u8) -> Self {
        Self { date, count, level }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Decoded result of a single query-by-year against the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearContributions {
    pub year: i32,
    pub records: Vec<DailyRecord>,
    /// Yearly total as reported by the feed, not recomputed.
    pub total: u64,
}
