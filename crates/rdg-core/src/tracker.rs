//! Query facade combining acquisition, extraction, and reconciliation.

use chrono::{DateTime, Duration, Utc};

use crate::dedup::{self, DedupPolicy};
use crate::event::SessionEvent;
use crate::merge;
use crate::parser;
use crate::source::{RecordQuery, RecordSource, SourceError};
use crate::summary::{self, UserDailySession, UserSummary};

/// Reconciles raw gateway records into clean session intervals and summaries.
///
/// Holds nothing across calls beyond the source handle and the dedup policy;
/// concurrent queries over different windows are independent.
#[derive(Debug, Clone)]
pub struct SessionTracker<S> {
    source: S,
    policy: DedupPolicy,
}

impl<S: RecordSource> SessionTracker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: DedupPolicy::default(),
        }
    }

    /// Selects the overlap tie-break policy used by deduplication.
    #[must_use]
    pub fn with_policy(mut self, policy: DedupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parsed and deduplicated events in `[since, to]`.
    pub fn events(
        &self,
        since: DateTime<Utc>,
        to: DateTime<Utc>,
        machine_name: Option<&str>,
    ) -> Result<Vec<SessionEvent>, SourceError> {
        let query = RecordQuery {
            since,
            to,
            machine_name: machine_name.map(str::to_string),
        };
        let records = self.source.records(&query)?;
        let events = parser::parse_records(&records);
        tracing::debug!(
            records = records.len(),
            events = events.len(),
            "parsed raw records"
        );
        Ok(dedup::deduplicate(events, self.policy))
    }

    /// Events with consecutive same-user sessions joined when separated by at
    /// most `max_gap`. `None` disables joining.
    pub fn merged_events(
        &self,
        since: DateTime<Utc>,
        to: DateTime<Utc>,
        max_gap: Option<Duration>,
        machine_name: Option<&str>,
    ) -> Result<Vec<SessionEvent>, SourceError> {
        let events = self.events(since, to, machine_name)?;
        Ok(merge::merge_sessions(events, max_gap))
    }

    /// One usage summary per distinct user, reduced from the deduplicated
    /// (never the merged) event list.
    pub fn summary_sessions(
        &self,
        since: DateTime<Utc>,
        to: DateTime<Utc>,
        machine_name: Option<&str>,
    ) -> Result<Vec<UserSummary>, SourceError> {
        Ok(summary::summarize(&self.events(since, to, machine_name)?))
    }

    /// Per-user, per-UTC-day breakdown of the deduplicated event list.
    pub fn daily_sessions(
        &self,
        since: DateTime<Utc>,
        to: DateTime<Utc>,
        machine_name: Option<&str>,
    ) -> Result<Vec<UserDailySession>, SourceError> {
        Ok(summary::summarize_daily(
            &self.events(since, to, machine_name)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawRecord;

    /// In-memory source for exercising the facade without a file.
    struct StaticSource {
        records: Vec<RawRecord>,
    }

    impl RecordSource for StaticSource {
        fn records(&self, query: &RecordQuery) -> Result<Vec<RawRecord>, SourceError> {
            Ok(self
                .records
                .iter()
                .filter(|r| query.contains(r.timestamp))
                .cloned()
                .collect())
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn disconnect_message(user: &str, duration: i64) -> String {
        format!(
            r#"The user "{user}", on client computer "203.0.113.10", disconnected from the following network resource: "ts01.example.net". Before the user disconnected, the client transferred 100 bytes and received 200 bytes. The client session duration was {duration} seconds. Connection protocol used: "HTTP"."#
        )
    }

    fn fixture() -> StaticSource {
        StaticSource {
            records: vec![
                RawRecord {
                    timestamp: at("2025-03-01T10:05:00Z"),
                    message: disconnect_message("alice", 300),
                    machine: None,
                },
                // Duplicate of the first entry, logged twice by the gateway.
                RawRecord {
                    timestamp: at("2025-03-01T10:05:00Z"),
                    message: disconnect_message("alice", 300),
                    machine: None,
                },
                RawRecord {
                    timestamp: at("2025-03-01T10:10:00Z"),
                    message: disconnect_message("alice", 240),
                    machine: None,
                },
                RawRecord {
                    timestamp: at("2025-03-01T10:30:00Z"),
                    message: "gateway service heartbeat".to_string(),
                    machine: None,
                },
                RawRecord {
                    timestamp: at("2025-03-01T10:20:00Z"),
                    message: disconnect_message("bob", 120),
                    machine: None,
                },
            ],
        }
    }

    #[test]
    fn events_are_parsed_and_deduplicated() {
        let tracker = SessionTracker::new(fixture());

        let events = tracker
            .events(at("2025-03-01T00:00:00Z"), at("2025-03-02T00:00:00Z"), None)
            .unwrap();

        // Two alice sessions (duplicate collapsed), one bob session; the
        // heartbeat record is dropped.
        assert_eq!(events.len(), 3);
        assert_eq!(
            events.iter().filter(|e| e.user_name == "alice").count(),
            2
        );
    }

    #[test]
    fn merged_events_join_within_gap() {
        let tracker = SessionTracker::new(fixture());

        let events = tracker
            .merged_events(
                at("2025-03-01T00:00:00Z"),
                at("2025-03-02T00:00:00Z"),
                Some(Duration::minutes(2)),
                None,
            )
            .unwrap();

        // alice 10:00-10:05 and 10:06-10:10 join into one 600 s session.
        let alice: Vec<_> = events.iter().filter(|e| e.user_name == "alice").collect();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].duration_seconds, 600);
    }

    #[test]
    fn summaries_reduce_the_deduplicated_list() {
        let tracker = SessionTracker::new(fixture());

        let summaries = tracker
            .summary_sessions(at("2025-03-01T00:00:00Z"), at("2025-03-02T00:00:00Z"), None)
            .unwrap();

        assert_eq!(summaries.len(), 2);
        let alice = summaries.iter().find(|s| s.user_name == "alice").unwrap();
        // 300 + 240, not the 600 s wall-clock span of the merged view.
        assert_eq!(alice.total_duration_seconds, 540);
        assert_eq!(alice.end, at("2025-03-01T10:10:00Z"));
        assert_eq!(alice.start, at("2025-03-01T10:01:00Z"));
    }

    #[test]
    fn daily_sessions_reduce_per_day() {
        let tracker = SessionTracker::new(fixture());

        let daily = tracker
            .daily_sessions(at("2025-03-01T00:00:00Z"), at("2025-03-02T00:00:00Z"), None)
            .unwrap();

        assert_eq!(daily.len(), 2); // alice + bob, all on one day
        assert!(daily.iter().all(|d| d.date.to_string() == "2025-03-01"));
    }

    #[test]
    fn window_outside_records_yields_empty_results() {
        let tracker = SessionTracker::new(fixture());

        let events = tracker
            .events(at("2026-01-01T00:00:00Z"), at("2026-01-02T00:00:00Z"), None)
            .unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn policy_override_changes_dedup_behavior() {
        // Two overlapping alice records 20 s short of abutting: tolerant
        // merges them, longest-wins keeps only the longer.
        let source = || StaticSource {
            records: vec![
                RawRecord {
                    timestamp: at("2025-03-01T10:05:00Z"),
                    message: disconnect_message("alice", 300),
                    machine: None,
                },
                RawRecord {
                    timestamp: at("2025-03-01T10:08:20Z"),
                    message: disconnect_message("alice", 220),
                    machine: None,
                },
            ],
        };
        let window = (at("2025-03-01T00:00:00Z"), at("2025-03-02T00:00:00Z"));

        let tolerant = SessionTracker::new(source());
        let events = tolerant.events(window.0, window.1, None).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_seconds, 500);

        let longest =
            SessionTracker::new(source()).with_policy(DedupPolicy::LongestWins);
        let events = longest.events(window.0, window.1, None).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_seconds, 300);
    }
}
