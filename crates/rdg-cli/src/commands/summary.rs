//! Summary command: per-user usage totals.

use std::fmt::Write;

use anyhow::Result;
use rdg_core::{RecordSource, SessionTracker, UserSummary};

use super::util::{format_duration, parse_datetime};

/// Runs the summary command: an aligned table by default, JSON with `--json`.
pub fn run<S: RecordSource>(
    tracker: &SessionTracker<S>,
    since: &str,
    to: &str,
    machine: Option<&str>,
    json: bool,
) -> Result<()> {
    let since = parse_datetime(since)?;
    let to = parse_datetime(to)?;

    let summaries = tracker.summary_sessions(since, to, machine)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", format_table(&summaries));
    }

    Ok(())
}

/// Renders summaries as an aligned table.
fn format_table(summaries: &[UserSummary]) -> String {
    let mut out = String::new();

    if summaries.is_empty() {
        out.push_str("No sessions in the selected window.\n");
        return out;
    }

    let name_width = summaries
        .iter()
        .map(|s| s.user_name.len())
        .max()
        .unwrap_or(0)
        .max("USER".len());

    let _ = writeln!(
        out,
        "{:<name_width$}  {:<19}  {:<19}  TOTAL",
        "USER", "START", "END"
    );
    for s in summaries {
        let start = s.start.format("%Y-%m-%d %H:%M:%S").to_string();
        let end = s.end.format("%Y-%m-%d %H:%M:%S").to_string();
        let _ = writeln!(
            out,
            "{:<name_width$}  {start}  {end}  {}",
            s.user_name,
            format_duration(s.total_duration_seconds)
        );
    }

    out
}
