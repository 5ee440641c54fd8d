//! Daily command: per-user, per-day usage breakdown.

use std::fmt::Write;

use anyhow::Result;
use rdg_core::{RecordSource, SessionTracker, UserDailySession};

use super::util::{format_duration, parse_datetime};

/// Runs the daily command: an aligned table by default, JSON with `--json`.
pub fn run<S: RecordSource>(
    tracker: &SessionTracker<S>,
    since: &str,
    to: &str,
    machine: Option<&str>,
    json: bool,
) -> Result<()> {
    let since = parse_datetime(since)?;
    let to = parse_datetime(to)?;

    let days = tracker.daily_sessions(since, to, machine)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        print!("{}", format_table(&days));
    }

    Ok(())
}

/// Renders daily sessions as an aligned table.
fn format_table(days: &[UserDailySession]) -> String {
    let mut out = String::new();

    if days.is_empty() {
        out.push_str("No sessions in the selected window.\n");
        return out;
    }

    let name_width = days
        .iter()
        .map(|d| d.user_name.len())
        .max()
        .unwrap_or(0)
        .max("USER".len());

    let _ = writeln!(out, "{:<name_width$}  {:<10}  TOTAL", "USER", "DATE");
    for d in days {
        let _ = writeln!(
            out,
            "{:<name_width$}  {}  {}",
            d.user_name,
            d.date.format("%Y-%m-%d"),
            format_duration(d.total_duration_seconds)
        );
    }

    out
}
