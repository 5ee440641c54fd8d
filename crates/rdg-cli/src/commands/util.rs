//! Shared parsing and formatting helpers for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Pre-compiled regex for gap durations like "90s", "15m", "2h".
static GAP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s*([smh])$").unwrap());

/// Conservative bound for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as either ISO 8601 or relative time.
///
/// Supports:
/// - ISO 8601: "2025-03-01T10:30:00Z"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    // Try ISO 8601 first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s.trim()) else {
        anyhow::bail!(
            "invalid datetime: {s}. Use ISO 8601 (e.g., 2025-03-01T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let minutes_per_unit = match &caps[2] {
        "minute" => 1,
        "hour" => 60,
        "day" => 60 * 24,
        "week" => 60 * 24 * 7,
        unit => anyhow::bail!("unknown time unit: {unit}"),
    };

    let minutes = n
        .checked_mul(minutes_per_unit)
        .filter(|m| *m <= MAX_RELATIVE_MINUTES)
        .with_context(|| format!("relative time value too large: {n} {}", &caps[2]))?;

    Ok(Utc::now() - Duration::minutes(minutes))
}

/// Parse a merge gap like "90s", "15m", or "2h".
pub fn parse_gap(s: &str) -> anyhow::Result<Duration> {
    let Some(caps) = GAP_RE.captures(s.trim()) else {
        anyhow::bail!("invalid gap: {s}. Use forms like 90s, 15m, 2h");
    };

    let n: i64 = caps[1].parse().context("failed to parse gap value")?;

    let seconds_per_unit = match &caps[2] {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        unit => anyhow::bail!("unknown gap unit: {unit}"),
    };

    let seconds = n
        .checked_mul(seconds_per_unit)
        .with_context(|| format!("gap value too large: {s}"))?;

    Ok(Duration::seconds(seconds))
}

/// Formats a second count as "2h 5m", "5m 30s", or "45s".
/// Negative durations are treated as 0s (defensive).
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    if seconds < 0 {
        return "0s".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
