//! Merged command: gap-merged session events as JSON Lines.

use anyhow::Result;
use chrono::Duration;
use rdg_core::{RecordSource, SessionTracker};

use super::util::parse_datetime;

/// Runs the merged command. `max_gap = None` prints the deduplicated events
/// without joining.
pub fn run<S: RecordSource>(
    tracker: &SessionTracker<S>,
    since: &str,
    to: &str,
    max_gap: Option<Duration>,
    machine: Option<&str>,
) -> Result<()> {
    let since = parse_datetime(since)?;
    let to = parse_datetime(to)?;

    for event in tracker.merged_events(since, to, max_gap, machine)? {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
