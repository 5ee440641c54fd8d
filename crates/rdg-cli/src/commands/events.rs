//! Events command: deduplicated session events as JSON Lines.

use anyhow::Result;
use rdg_core::{RecordSource, SessionTracker};

use super::util::parse_datetime;

/// Runs the events command, writing one JSON object per event to stdout.
pub fn run<S: RecordSource>(
    tracker: &SessionTracker<S>,
    since: &str,
    to: &str,
    machine: Option<&str>,
) -> Result<()> {
    let since = parse_datetime(since)?;
    let to = parse_datetime(to)?;

    for event in tracker.events(since, to, machine)? {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
