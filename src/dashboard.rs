// 🧭 Dashboard Stats - Streak, debt and activity in one payload

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{build_daily_aggregates, weekly_activity};
use crate::config::{EngineConfig, MIN_PAGES_PER_DAY};
use crate::debt::{DebtCalculator, DebtResult};
use crate::entities::{DailyReadingAggregate, LibraryEntry, ReadingSession, ReadingState};
use crate::streak::{calculate_streak_at, StreakResult};
use crate::temporal::utc_today;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub streak: StreakResult,
    pub debt: DebtResult,
    pub today_pages: u64,
    pub today_qualifies: bool,

    /// Exactly seven days, today last
    pub weekly_activity: Vec<DailyReadingAggregate>,

    pub total_pages_all_time: u64,
    pub total_books_completed: usize,
}

pub struct AnalyticsEngine {
    pub min_pages_per_day: u64,
    pub debt: DebtCalculator,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        AnalyticsEngine {
            min_pages_per_day: MIN_PAGES_PER_DAY,
            debt: DebtCalculator::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        AnalyticsEngine {
            min_pages_per_day: config.min_pages_per_day,
            debt: DebtCalculator::from_config(config),
        }
    }

    /// Sessions → newest-first daily aggregates
    pub fn aggregate(&self, sessions: &[ReadingSession]) -> Vec<DailyReadingAggregate> {
        build_daily_aggregates(sessions, self.min_pages_per_day)
    }

    /// Full dashboard as of `today`
    pub fn dashboard_at(
        &self,
        sessions: &[ReadingSession],
        library: &[LibraryEntry],
        today: NaiveDate,
    ) -> DashboardStats {
        let daily = self.aggregate(sessions);
        let streak = calculate_streak_at(&daily, today);
        let debt = self.debt.calculate_at(&daily, streak.current_streak, today);

        let today_pages = daily
            .iter()
            .find(|d| d.date == today)
            .map(|d| d.total_pages)
            .unwrap_or(0);

        let stats = DashboardStats {
            today_qualifies: today_pages >= self.min_pages_per_day,
            weekly_activity: weekly_activity(&daily, today, self.min_pages_per_day),
            total_pages_all_time: daily.iter().map(|d| d.total_pages).sum(),
            total_books_completed: library
                .iter()
                .filter(|e| e.state == Some(ReadingState::Completed))
                .count(),
            streak,
            debt,
            today_pages,
        };

        debug!(
            days = daily.len(),
            current_streak = stats.streak.current_streak,
            debt = stats.debt.debt,
            "Built dashboard stats"
        );

        stats
    }

    /// Full dashboard as of the current UTC day
    pub fn dashboard(&self, sessions: &[ReadingSession], library: &[LibraryEntry]) -> DashboardStats {
        self.dashboard_at(sessions, library, utc_today())
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
