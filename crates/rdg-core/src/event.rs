//! Gateway session events derived from disconnect records.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One user session, reconstructed from a gateway disconnect record.
///
/// The disconnect timestamp is the authority; the session start is derived
/// from it and the reported duration. Events are immutable; every
/// reconciliation step builds new events instead of mutating inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// When the connection ended.
    pub disconnect_time: DateTime<Utc>,
    /// Account that held the session.
    pub user_name: String,
    /// Client address as reported by the gateway.
    pub client_ip: String,
    /// Network resource the client was connected to.
    pub resource: String,
    /// Connected duration in seconds. Never negative.
    pub duration_seconds: i64,
    /// Connection protocol (e.g., "HTTP", "UDP").
    pub protocol: String,
}

impl SessionEvent {
    /// Derived start of the session: `disconnect_time - duration`.
    #[must_use]
    pub fn connect_time(&self) -> DateTime<Utc> {
        self.disconnect_time - Duration::seconds(self.duration_seconds)
    }

    /// Strict interval intersection: abutting intervals do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.connect_time() < other.disconnect_time && other.connect_time() < self.disconnect_time
    }
}

/// Groups events by case-folded user name, each group sorted by ascending
/// connect time. Group keys iterate in folded-name order.
pub(crate) fn group_by_user(events: Vec<SessionEvent>) -> BTreeMap<String, Vec<SessionEvent>> {
    let mut sorted = events;
    sorted.sort_by_key(SessionEvent::connect_time);

    let mut groups: BTreeMap<String, Vec<SessionEvent>> = BTreeMap::new();
    for event in sorted {
        groups
            .entry(event.user_name.to_lowercase())
            .or_default()
            .push(event);
    }
    groups
}
