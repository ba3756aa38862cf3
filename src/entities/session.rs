// 📖 Session Entities - Raw reading sessions and per-day aggregates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::MIN_PAGES_PER_DAY;

/// One recorded reading session, as stored by the session log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
    /// UTC calendar day the session was recorded on
    pub date: NaiveDate,

    /// Book the session belongs to
    pub item_id: String,

    pub pages: u64,

    #[serde(default)]
    pub words: u64,

    #[serde(default)]
    pub duration_seconds: Option<u64>,
}

/// One UTC calendar day of reading activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReadingAggregate {
    pub date: NaiveDate,
    pub total_pages: u64,
    pub total_words: u64,
    pub total_duration_seconds: u64,
    pub distinct_items_read: BTreeSet<String>,

    /// total_pages >= the daily minimum
    pub qualifies: bool,
}

impl DailyReadingAggregate {
    /// Aggregate with `qualifies` derived from the default daily minimum
    pub fn new(date: NaiveDate, total_pages: u64) -> Self {
        Self::with_minimum(date, total_pages, MIN_PAGES_PER_DAY)
    }

    /// Aggregate with `qualifies` derived from a custom daily minimum
    pub fn with_minimum(date: NaiveDate, total_pages: u64, min_pages_per_day: u64) -> Self {
        DailyReadingAggregate {
            date,
            total_pages,
            total_words: 0,
            total_duration_seconds: 0,
            distinct_items_read: BTreeSet::new(),
            qualifies: total_pages >= min_pages_per_day,
        }
    }

    /// Empty day (used to zero-fill activity windows)
    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, 0)
    }
}
