//! Gap-based consolidation of consecutive sessions.
//!
//! A user who reconnects within a few minutes is usually still "the same
//! sitting". Merging joins consecutive intervals separated by no more than a
//! caller-chosen gap into one longer session.

use chrono::Duration;

use crate::event::{SessionEvent, group_by_user};

/// Joins consecutive same-user events whose gap is at most `max_gap`
/// (inclusive).
///
/// The joined event spans from the earlier event's connect time to the later
/// event's disconnect time, and its duration is that wall-clock span: idle
/// seconds inside the gap count as connected. This differs deliberately from
/// deduplication, which sums durations and never counts a second twice.
///
/// `max_gap = None` disables joining; the result is still the grouped,
/// connect-time-sorted copy of the input.
#[must_use]
pub fn merge_sessions(events: Vec<SessionEvent>, max_gap: Option<Duration>) -> Vec<SessionEvent> {
    group_by_user(events)
        .into_values()
        .flat_map(|group| merge_group(group, max_gap))
        .collect()
}

fn merge_group(group: Vec<SessionEvent>, max_gap: Option<Duration>) -> Vec<SessionEvent> {
    let mut accepted: Vec<SessionEvent> = Vec::with_capacity(group.len());

    for current in group {
        let Some(last) = accepted.last_mut() else {
            accepted.push(current);
            continue;
        };

        let gap = current.connect_time() - last.disconnect_time;
        if max_gap.is_some_and(|max| gap <= max) {
            let span = current.disconnect_time - last.connect_time();
            let joined = SessionEvent {
                disconnect_time: current.disconnect_time,
                duration_seconds: span.num_seconds(),
                ..last.clone()
            };
            *last = joined;
        } else {
            accepted.push(current);
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::event::test_support::event;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn joins_events_within_gap_into_wall_clock_span() {
        // 10:00-10:05 and 10:06-10:10 with a 2-minute allowance: one session
        // of 600 s, not 540.
        let events = vec![
            event("alice", "2025-03-01T10:05:00Z", 300),
            event("alice", "2025-03-01T10:10:00Z", 240),
        ];

        let result = merge_sessions(events, Some(Duration::minutes(2)));

        assert_eq!(result.len(), 1);
        let joined = &result[0];
        assert_eq!(joined.duration_seconds, 600);
        assert_eq!(
            joined.connect_time(),
            at("2025-03-01T10:00:00Z")
        );
        assert_eq!(
            joined.disconnect_time,
            at("2025-03-01T10:10:00Z")
        );
    }

    #[test]
    fn gap_equal_to_max_gap_is_joined() {
        // Exactly 60 s apart.
        let events = vec![
            event("alice", "2025-03-01T10:05:00Z", 300),
            event("alice", "2025-03-01T10:10:00Z", 240), // connects 10:06:00
        ];

        let result = merge_sessions(events, Some(Duration::seconds(60)));

        assert_eq!(result.len(), 1);
    }

    #[test]
    fn gap_one_second_over_max_gap_is_not_joined() {
        let events = vec![
            event("alice", "2025-03-01T10:05:00Z", 300),
            event("alice", "2025-03-01T10:10:00Z", 240), // connects 10:06:00
        ];

        let result = merge_sessions(events, Some(Duration::seconds(59)));

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn no_max_gap_keeps_every_event() {
        let events = vec![
            event("alice", "2025-03-01T10:05:00Z", 300),
            event("alice", "2025-03-01T10:05:30Z", 10),
        ];

        let result = merge_sessions(events, None);

        assert_eq!(result.len(), 2);
        // Still sorted by connect time.
        assert!(result[0].connect_time() <= result[1].connect_time());
    }

    #[test]
    fn chains_across_several_events() {
        let events = vec![
            event("alice", "2025-03-01T10:05:00Z", 300),
            event("alice", "2025-03-01T10:11:00Z", 300), // gap 60 s
            event("alice", "2025-03-01T10:17:00Z", 300), // gap 60 s
            event("alice", "2025-03-01T11:00:00Z", 300), // gap way over
        ];

        let result = merge_sessions(events, Some(Duration::minutes(1)));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].duration_seconds, 1020); // 10:00-10:17
        assert_eq!(result[1].duration_seconds, 300);
    }

    #[test]
    fn joined_event_carries_context_of_the_earlier_one() {
        let mut first = event("alice", "2025-03-01T10:05:00Z", 300);
        first.resource = "ts01".to_string();
        let mut second = event("alice", "2025-03-01T10:10:00Z", 240);
        second.resource = "ts02".to_string();

        let result = merge_sessions(vec![first, second], Some(Duration::minutes(2)));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].resource, "ts01");
    }

    #[test]
    fn users_group_case_insensitively() {
        let events = vec![
            event("Alice", "2025-03-01T10:05:00Z", 300),
            event("alice", "2025-03-01T10:10:00Z", 240),
        ];

        let result = merge_sessions(events, Some(Duration::minutes(2)));

        assert_eq!(result.len(), 1);
    }

    #[test]
    fn different_users_never_join() {
        let events = vec![
            event("alice", "2025-03-01T10:05:00Z", 300),
            event("bob", "2025-03-01T10:06:00Z", 60),
        ];

        let result = merge_sessions(events, Some(Duration::minutes(30)));

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(merge_sessions(Vec::new(), Some(Duration::minutes(2))).is_empty());
        assert!(merge_sessions(Vec::new(), None).is_empty());
    }
}
