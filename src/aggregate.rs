// 📊 Daily Aggregates - Raw sessions grouped by UTC calendar day

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::entities::{DailyReadingAggregate, ReadingSession};

/// Group sessions by date, newest first, one aggregate per date
pub fn build_daily_aggregates(
    sessions: &[ReadingSession],
    min_pages_per_day: u64,
) -> Vec<DailyReadingAggregate> {
    let mut by_date: BTreeMap<NaiveDate, DailyReadingAggregate> = BTreeMap::new();

    for session in sessions {
        let day = by_date
            .entry(session.date)
            .or_insert_with(|| DailyReadingAggregate::with_minimum(session.date, 0, min_pages_per_day));

        day.total_pages += session.pages;
        day.total_words += session.words;
        day.total_duration_seconds += session.duration_seconds.unwrap_or(0);
        day.distinct_items_read.insert(session.item_id.clone());
    }

    by_date
        .into_values()
        .rev()
        .map(|mut day| {
            day.qualifies = day.total_pages >= min_pages_per_day;
            day
        })
        .collect()
}

/// The seven days ending today, oldest first, zero-filled where nothing was read
pub fn weekly_activity(
    daily: &[DailyReadingAggregate],
    today: NaiveDate,
    min_pages_per_day: u64,
) -> Vec<DailyReadingAggregate> {
    (0..7)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .map(|date| {
            daily
                .iter()
                .find(|d| d.date == date)
                .cloned()
                .unwrap_or_else(|| DailyReadingAggregate::with_minimum(date, 0, min_pages_per_day))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::parse_iso_date;

    fn day(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn create_test_session(date: &str, item: &str, pages: u64, seconds: Option<u64>) -> ReadingSession {
        ReadingSession {
            date: day(date),
            item_id: item.to_string(),
            pages,
            words: pages * 250,
            duration_seconds: seconds,
        }
    }

    #[test]
    fn test_groups_by_date_newest_first() {
        let sessions = vec![
            create_test_session("2026-02-16", "a", 2, Some(60)),
            create_test_session("2026-02-18", "a", 3, Some(120)),
            create_test_session("2026-02-18", "b", 4, None),
            create_test_session("2026-02-18", "a", 1, Some(30)),
        ];

        let daily = build_daily_aggregates(&sessions, 5);
        assert_eq!(daily.len(), 2);

        assert_eq!(daily[0].date, day("2026-02-18"));
        assert_eq!(daily[0].total_pages, 8);
        assert_eq!(daily[0].total_words, 2_000);
        assert_eq!(daily[0].total_duration_seconds, 150);
        assert_eq!(daily[0].distinct_items_read.len(), 2);
        assert!(daily[0].qualifies);

        assert_eq!(daily[1].date, day("2026-02-16"));
        assert!(!daily[1].qualifies);
    }

    #[test]
    fn test_no_sessions() {
        assert!(build_daily_aggregates(&[], 5).is_empty());
    }

    #[test]
    fn test_weekly_activity_zero_fills() {
        let daily = vec![
            DailyReadingAggregate::new(day("2026-02-18"), 6),
            DailyReadingAggregate::new(day("2026-02-14"), 9),
            DailyReadingAggregate::new(day("2026-02-01"), 9),
        ];

        let week = weekly_activity(&daily, day("2026-02-18"), 5);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, day("2026-02-12"));
        assert_eq!(week[6].date, day("2026-02-18"));
        assert_eq!(week[6].total_pages, 6);
        assert_eq!(week[2].total_pages, 9);
        assert_eq!(week[1].total_pages, 0);
        assert!(!week[1].qualifies);
    }
}
