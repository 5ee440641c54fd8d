//! Collapses overlapping or near-duplicate session intervals.
//!
//! Duplicate log entries and reconnect storms produce several records for
//! what a person would call one session. Deduplication keeps, per user, a
//! minimal set of pairwise non-overlapping intervals.

use chrono::Duration;

use crate::event::{SessionEvent, group_by_user};

/// Tie-break policy applied when two intervals of the same user overlap.
///
/// Two policies exist because overlapping records are genuinely ambiguous:
/// either the records describe one session seen twice (merge them) or one of
/// them is noise (keep the better one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Union-merge a pair whose boundaries are within `tolerance` of
    /// abutting, counting overlapping seconds once; pairs further apart fall
    /// back to keeping the longer interval.
    Tolerant {
        /// Maximum distance between one interval's end and the other's start
        /// for the pair to be considered the same session.
        tolerance: Duration,
    },
    /// Always keep the longer of the two intervals, discarding the other.
    LongestWins,
}

impl Default for DedupPolicy {
    /// Tolerant merging within one minute, the gateway's observed
    /// double-logging window.
    fn default() -> Self {
        Self::Tolerant {
            tolerance: Duration::seconds(60),
        }
    }
}

/// Collapses overlapping intervals per user under the given policy.
///
/// Events are sorted by connect time and grouped by case-folded user name;
/// each group folds into a fresh accepted list. For each event, only the
/// first overlapping accepted interval (in insertion order) is acted upon and
/// processing of that event stops. A region covered by three or more records
/// is resolved pairwise, one pair per incoming event, never three ways at
/// once.
#[must_use]
pub fn deduplicate(events: Vec<SessionEvent>, policy: DedupPolicy) -> Vec<SessionEvent> {
    group_by_user(events)
        .into_values()
        .flat_map(|group| dedup_group(group, policy))
        .collect()
}

fn dedup_group(group: Vec<SessionEvent>, policy: DedupPolicy) -> Vec<SessionEvent> {
    let mut accepted: Vec<SessionEvent> = Vec::with_capacity(group.len());

    for current in group {
        match accepted.iter().position(|e| e.overlaps(&current)) {
            Some(i) => {
                let resolved = resolve_pair(&accepted[i], &current, policy);
                accepted[i] = resolved;
            }
            None => accepted.push(current),
        }
    }

    accepted
}

fn resolve_pair(
    existing: &SessionEvent,
    current: &SessionEvent,
    policy: DedupPolicy,
) -> SessionEvent {
    if let DedupPolicy::Tolerant { tolerance } = policy {
        // `current` starts at or after `existing` (connect-time order), so
        // the distance from overlap to abutment is end-of-existing minus
        // start-of-current.
        if existing.disconnect_time - current.connect_time() < tolerance {
            return merged(existing, current);
        }
    }

    if current.duration_seconds > existing.duration_seconds {
        current.clone()
    } else {
        existing.clone()
    }
}

/// Union of two overlapping intervals. Overlapping seconds are counted once;
/// context fields stay with the earlier-accepted event.
fn merged(existing: &SessionEvent, current: &SessionEvent) -> SessionEvent {
    let latest_connect = existing.connect_time().max(current.connect_time());
    let earliest_disconnect = existing.disconnect_time.min(current.disconnect_time);
    let latest_disconnect = existing.disconnect_time.max(current.disconnect_time);

    let overlap_seconds = (earliest_disconnect - latest_connect).num_seconds();

    SessionEvent {
        disconnect_time: latest_disconnect,
        duration_seconds: existing.duration_seconds + current.duration_seconds - overlap_seconds,
        ..existing.clone()
    }
}
