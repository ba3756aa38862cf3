// 🔥 Streak Calculator - Consecutive qualifying reading days
//
// Current streak: walk newest-first from today or yesterday (grace for a
// day not finished yet); the first gap or non-qualifying day ends it.
// Longest streak: scan the whole history oldest-first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::{DailyReadingAggregate, ReadingSession};
use crate::temporal::{previous_day, utc_today};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResult {
    pub current_streak: u32,

    /// Always >= current_streak
    pub longest_streak: u32,

    /// Newest qualifying day in the input
    pub last_qualifying_date: Option<NaiveDate>,
}

/// Streaks as of the current UTC day
pub fn calculate_streak(daily: &[DailyReadingAggregate]) -> StreakResult {
    calculate_streak_at(daily, utc_today())
}

/// Streaks as of `today`.
///
/// `daily` must be sorted newest-first with at most one entry per date.
pub fn calculate_streak_at(daily: &[DailyReadingAggregate], today: NaiveDate) -> StreakResult {
    if daily.is_empty() {
        return StreakResult::default();
    }

    StreakResult {
        current_streak: current_streak(daily, today),
        longest_streak: longest_streak(daily),
        last_qualifying_date: daily.iter().find(|d| d.qualifies).map(|d| d.date),
    }
}

fn current_streak(daily: &[DailyReadingAggregate], today: NaiveDate) -> u32 {
    let yesterday = previous_day(today);
    let mut streak = 0;
    let mut expected: Option<NaiveDate> = None;

    for day in daily {
        let anchored = match expected {
            // Only the newest entry may start a streak
            None => day.date == today || day.date == yesterday,
            Some(next) => day.date == next,
        };
        if !anchored || !day.qualifies {
            break;
        }
        streak += 1;
        expected = Some(previous_day(day.date));
    }

    streak
}

fn longest_streak(daily: &[DailyReadingAggregate]) -> u32 {
    let mut ascending: Vec<&DailyReadingAggregate> = daily.iter().collect();
    ascending.sort_by_key(|d| d.date);

    let mut longest: u32 = 0;
    let mut run: u32 = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in ascending {
        if !day.qualifies {
            longest = longest.max(run);
            run = 0;
            previous = None;
            continue;
        }

        match previous {
            Some(prev) if previous_day(day.date) != prev => {
                longest = longest.max(run);
                run = 1;
            }
            _ => run += 1,
        }
        previous = Some(day.date);
    }

    longest.max(run)
}

/// Streak for a single book from its raw sessions.
///
/// Pages are summed per date. The streak is anchored at today if today
/// reaches the minimum, else at yesterday, else it is zero.
pub fn calc_book_streak(sessions: &[ReadingSession], today: NaiveDate, min_pages_per_day: u64) -> u32 {
    let mut pages_by_date: HashMap<NaiveDate, u64> = HashMap::new();
    for session in sessions {
        *pages_by_date.entry(session.date).or_insert(0) += session.pages;
    }

    let earliest = match pages_by_date.keys().min() {
        Some(d) => *d,
        None => return 0,
    };
    let pages_on = |date: NaiveDate| pages_by_date.get(&date).copied().unwrap_or(0);

    let mut expected = if pages_on(today) >= min_pages_per_day {
        today
    } else if pages_on(previous_day(today)) >= min_pages_per_day {
        previous_day(today)
    } else {
        return 0;
    };

    let mut streak = 0;
    // Bounded by the earliest session so a zero minimum still terminates
    while expected >= earliest && pages_on(expected) >= min_pages_per_day {
        streak += 1;
        expected = previous_day(expected);
    }

    streak
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::parse_iso_date;

    const TODAY: &str = "2026-02-18";

    fn day(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn create_test_day(date: &str, pages: u64) -> DailyReadingAggregate {
        DailyReadingAggregate::new(day(date), pages)
    }

    fn create_test_session(date: &str, pages: u64) -> ReadingSession {
        ReadingSession {
            date: day(date),
            item_id: "book-1".to_string(),
            pages,
            words: pages * 250,
            duration_seconds: None,
        }
    }

    #[test]
    fn test_empty_input() {
        let result = calculate_streak_at(&[], day(TODAY));
        assert_eq!(result, StreakResult::default());
    }

    #[test]
    fn test_today_and_yesterday() {
        let daily = vec![create_test_day("2026-02-18", 6), create_test_day("2026-02-17", 5)];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.longest_streak, 2);
        assert_eq!(result.last_qualifying_date, Some(day("2026-02-18")));
    }

    #[test]
    fn test_grace_period_starts_yesterday() {
        let daily = vec![
            create_test_day("2026-02-17", 10),
            create_test_day("2026-02-16", 10),
            create_test_day("2026-02-15", 10),
        ];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 3);
    }

    #[test]
    fn test_gap_at_yesterday_breaks_current() {
        let daily = vec![create_test_day("2026-02-16", 20)];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 1);
        assert_eq!(result.last_qualifying_date, Some(day("2026-02-16")));
    }

    #[test]
    fn test_gap_stops_walk() {
        let daily = vec![
            create_test_day("2026-02-18", 5),
            create_test_day("2026-02-17", 5),
            create_test_day("2026-02-15", 5),
            create_test_day("2026-02-14", 5),
        ];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.longest_streak, 2);
    }

    #[test]
    fn test_non_qualifying_day_stops_walk() {
        let daily = vec![
            create_test_day("2026-02-18", 8),
            create_test_day("2026-02-17", 4),
            create_test_day("2026-02-16", 8),
        ];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 1);
    }

    #[test]
    fn test_unfinished_today_does_not_start_streak() {
        // Newest entry must qualify; the walk does not skip past it
        let daily = vec![create_test_day("2026-02-18", 2), create_test_day("2026-02-17", 9)];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 1);
        assert_eq!(result.last_qualifying_date, Some(day("2026-02-17")));
    }

    #[test]
    fn test_longest_streak_in_history() {
        let daily = vec![
            create_test_day("2026-02-10", 5),
            create_test_day("2026-02-05", 5),
            create_test_day("2026-02-04", 5),
            create_test_day("2026-02-03", 5),
            create_test_day("2026-02-02", 1),
            create_test_day("2026-02-01", 5),
        ];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 3);
    }

    #[test]
    fn test_longest_streak_run_at_end_of_scan() {
        let daily = vec![
            create_test_day("2026-02-18", 5),
            create_test_day("2026-02-17", 5),
            create_test_day("2026-02-16", 5),
            create_test_day("2026-02-10", 5),
        ];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 3);
        assert_eq!(result.longest_streak, 3);
    }

    #[test]
    fn test_no_qualifying_days() {
        let daily = vec![create_test_day("2026-02-18", 1), create_test_day("2026-02-17", 4)];
        let result = calculate_streak_at(&daily, day(TODAY));
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 0);
        assert_eq!(result.last_qualifying_date, None);
    }

    #[test]
    fn test_book_streak_sums_sessions_per_day() {
        let sessions = vec![
            create_test_session("2026-02-18", 3),
            create_test_session("2026-02-18", 2),
            create_test_session("2026-02-17", 5),
            create_test_session("2026-02-16", 4),
        ];
        assert_eq!(calc_book_streak(&sessions, day(TODAY), 5), 2);
    }

    #[test]
    fn test_book_streak_anchors_at_yesterday() {
        let sessions = vec![
            create_test_session("2026-02-18", 1),
            create_test_session("2026-02-17", 6),
            create_test_session("2026-02-16", 6),
        ];
        assert_eq!(calc_book_streak(&sessions, day(TODAY), 5), 2);
    }

    #[test]
    fn test_book_streak_without_anchor() {
        let sessions = vec![create_test_session("2026-02-16", 50)];
        assert_eq!(calc_book_streak(&sessions, day(TODAY), 5), 0);
        assert_eq!(calc_book_streak(&[], day(TODAY), 5), 0);
    }

    #[test]
    fn test_book_streak_zero_minimum_terminates() {
        let sessions = vec![create_test_session("2026-02-16", 1)];
        assert_eq!(calc_book_streak(&sessions, day(TODAY), 0), 3);
    }
}
