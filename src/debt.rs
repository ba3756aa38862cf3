// 💳 Reading Debt - Missed qualifying days since the last one
//
//   debt = min(max_debt_days, max(0, days_since_last_qualifying - 1))
//
// Today is excluded: it is the chance to repay, not a missed day. Pages
// read today beyond the daily minimum repay debt one page per day owed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, MAX_DEBT_DAYS, MIN_PAGES_PER_DAY};
use crate::entities::DailyReadingAggregate;
use crate::temporal::{days_between, utc_today};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtResult {
    /// In [0, max_debt_days]
    pub debt: u32,

    /// In [0, debt]
    pub debt_repaid_today: u32,

    pub can_repay_more: bool,
}

impl DebtResult {
    pub fn remaining(&self) -> u32 {
        self.debt - self.debt_repaid_today
    }
}

pub struct DebtCalculator {
    /// Cap on accumulated debt (default: 15 days)
    pub max_debt_days: u64,

    /// Pages that count toward the day itself before repaying (default: 5)
    pub min_pages_per_day: u64,
}

impl DebtCalculator {
    pub fn new() -> Self {
        DebtCalculator {
            max_debt_days: MAX_DEBT_DAYS,
            min_pages_per_day: MIN_PAGES_PER_DAY,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        DebtCalculator {
            max_debt_days: config.max_debt_days,
            min_pages_per_day: config.min_pages_per_day,
        }
    }

    /// Debt as of `today`.
    ///
    /// `daily` is newest-first, the same input given to the streak calculator.
    pub fn calculate_at(
        &self,
        daily: &[DailyReadingAggregate],
        current_streak: u32,
        today: NaiveDate,
    ) -> DebtResult {
        // An active streak means nothing was missed
        if current_streak > 0 {
            return DebtResult::default();
        }

        let last_qualifying = match daily.iter().find(|d| d.qualifies) {
            Some(d) => d.date,
            None => return DebtResult::default(),
        };

        let days_since = days_between(today, last_qualifying);
        let missed_days = (days_since - 1).max(0) as u64;
        let debt = missed_days.min(self.max_debt_days);

        let today_pages = daily
            .iter()
            .find(|d| d.date == today)
            .map(|d| d.total_pages)
            .unwrap_or(0);
        let extra_pages = today_pages.saturating_sub(self.min_pages_per_day);
        let repaid = extra_pages.min(debt);

        DebtResult {
            debt: debt as u32,
            debt_repaid_today: repaid as u32,
            can_repay_more: debt > repaid,
        }
    }
}

impl Default for DebtCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Debt with default policy as of the current UTC day
pub fn calculate_reading_debt(daily: &[DailyReadingAggregate], current_streak: u32) -> DebtResult {
    calculate_reading_debt_at(daily, current_streak, utc_today())
}

/// Debt with default policy as of `today`
pub fn calculate_reading_debt_at(
    daily: &[DailyReadingAggregate],
    current_streak: u32,
    today: NaiveDate,
) -> DebtResult {
    DebtCalculator::new().calculate_at(daily, current_streak, today)
}

// ============================================================================
// TESTS
// ============================================================================
