//! Per-user usage reductions.
//!
//! Summaries are a pure reduction over the event list: no interval reasoning
//! happens here, and grouping is by exact user name (unlike deduplication and
//! merging, which fold case). See the crate docs for why that asymmetry is
//! kept.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::event::SessionEvent;

/// Aggregate usage for one user over a query window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_name: String,
    /// Approximated session start: `end - total_duration`. Exact only when
    /// the user's sessions are contiguous with no idle gaps.
    pub start: DateTime<Utc>,
    /// Latest disconnect across the user's events.
    pub end: DateTime<Utc>,
    /// Sum of the per-event durations.
    pub total_duration_seconds: i64,
}

/// Aggregate usage for one user on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDailySession {
    pub user_name: String,
    /// UTC day the sessions disconnected on.
    pub date: NaiveDate,
    /// Approximated start, as in [`UserSummary`].
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_duration_seconds: i64,
}

/// Reduces an event list to one summary per distinct user name.
///
/// Grouping is case-sensitive: "Bob" and "bob" produce separate summaries.
#[must_use]
pub fn summarize(events: &[SessionEvent]) -> Vec<UserSummary> {
    let mut totals: BTreeMap<&str, (i64, DateTime<Utc>)> = BTreeMap::new();

    for event in events {
        let entry = totals
            .entry(&event.user_name)
            .or_insert((0, event.disconnect_time));
        entry.0 += event.duration_seconds;
        entry.1 = entry.1.max(event.disconnect_time);
    }

    totals
        .into_iter()
        .map(|(user, (total, end))| UserSummary {
            user_name: user.to_string(),
            start: end - Duration::seconds(total),
            end,
            total_duration_seconds: total,
        })
        .collect()
}

/// Reduces an event list to one record per (user name, UTC day of
/// disconnect). Grouping is case-sensitive, matching [`summarize`].
#[must_use]
pub fn summarize_daily(events: &[SessionEvent]) -> Vec<UserDailySession> {
    let mut totals: BTreeMap<(&str, NaiveDate), (i64, DateTime<Utc>)> = BTreeMap::new();

    for event in events {
        let day = event.disconnect_time.date_naive();
        let entry = totals
            .entry((&event.user_name, day))
            .or_insert((0, event.disconnect_time));
        entry.0 += event.duration_seconds;
        entry.1 = entry.1.max(event.disconnect_time);
    }

    totals
        .into_iter()
        .map(|((user, date), (total, end))| UserDailySession {
            user_name: user.to_string(),
            date,
            start: end - Duration::seconds(total),
            end,
            total_duration_seconds: total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::test_support::event;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn sums_durations_and_approximates_start() {
        let events = vec![
            event("bob", "2025-03-01T10:00:00Z", 120),
            event("bob", "2025-03-01T12:00:00Z", 300),
        ];

        let result = summarize(&events);

        assert_eq!(result.len(), 1);
        let bob = &result[0];
        assert_eq!(bob.total_duration_seconds, 420);
        assert_eq!(bob.end, at("2025-03-01T12:00:00Z"));
        assert_eq!(bob.start, at("2025-03-01T11:53:00Z"));
    }

    #[test]
    fn end_is_max_disconnect_regardless_of_input_order() {
        let events = vec![
            event("bob", "2025-03-01T12:00:00Z", 300),
            event("bob", "2025-03-01T10:00:00Z", 120),
        ];

        let result = summarize(&events);

        assert_eq!(result[0].end, at("2025-03-01T12:00:00Z"));
    }

    #[test]
    fn grouping_is_case_sensitive() {
        // Deliberately unlike deduplication and merging.
        let events = vec![
            event("Bob", "2025-03-01T10:00:00Z", 120),
            event("bob", "2025-03-01T12:00:00Z", 300),
        ];

        let result = summarize(&events);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].user_name, "Bob");
        assert_eq!(result[0].total_duration_seconds, 120);
        assert_eq!(result[1].user_name, "bob");
        assert_eq!(result[1].total_duration_seconds, 300);
    }

    #[test]
    fn empty_input_yields_no_summaries() {
        assert!(summarize(&[]).is_empty());
        assert!(summarize_daily(&[]).is_empty());
    }

    #[test]
    fn daily_splits_by_utc_day_of_disconnect() {
        let events = vec![
            event("bob", "2025-03-01T23:00:00Z", 600),
            // Session crossing midnight lands on the day it disconnected.
            event("bob", "2025-03-02T00:10:00Z", 1200),
            event("bob", "2025-03-02T09:00:00Z", 300),
        ];

        let result = summarize_daily(&events);

        assert_eq!(result.len(), 2);

        let first = &result[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(first.total_duration_seconds, 600);

        let second = &result[1];
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(second.total_duration_seconds, 1500);
        assert_eq!(second.end, at("2025-03-02T09:00:00Z"));
    }
}
