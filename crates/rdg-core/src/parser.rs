//! Locale-tolerant extraction of session facts from raw log messages.
//!
//! Gateway disconnect messages are free text and arrive in whichever language
//! the gateway host runs in. Each supported locale contributes one fixed
//! template; templates are tried in order and the first match is
//! authoritative.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use regex::Regex;

use crate::event::SessionEvent;
use crate::source::RawRecord;

/// A fixed disconnect-message template for one gateway locale.
struct LocalePattern {
    locale: &'static str,
    regex: Regex,
}

/// Supported templates, in priority order. Adding a locale means appending an
/// entry here; nothing else branches on language.
///
/// Compiled once on first use and shared process-wide; `Regex` is read-only
/// after construction, so concurrent callers need no synchronization.
static PATTERNS: LazyLock<[LocalePattern; 2]> = LazyLock::new(|| {
    [
        LocalePattern {
            locale: "en",
            regex: Regex::new(
                r#"user "(?P<user>[^"]+)", on client computer "(?P<ip>[^"]+)", disconnected from the following network resource: "(?P<resource>[^"]+)"\..+?session duration was (?P<duration>\d+) seconds.+?protocol used: "(?P<protocol>[^"]+)""#,
            )
            .unwrap(),
        },
        LocalePattern {
            locale: "ru",
            regex: Regex::new(
                r#"Пользователь "(?P<user>[^"]+)" на клиентском компьютере "(?P<ip>[^"]+)" отключился от следующего сетевого ресурса: "(?P<resource>[^"]+)"\..+?Длительность сеанса клиента составила (?P<duration>\d+) с\..+?Использован протокол подключения "(?P<protocol>[^"]+)""#,
            )
            .unwrap(),
        },
    ]
});

/// Extracts a session event from one raw message.
///
/// Returns `None` for blank messages, messages matching no template, and
/// durations that do not fit a non-negative `i64`. Never panics on any input;
/// extraction from a noisy text source is best-effort by contract.
#[must_use]
pub fn parse_event(disconnect_time: DateTime<Utc>, message: &str) -> Option<SessionEvent> {
    if message.trim().is_empty() {
        return None;
    }

    let (locale, caps) = PATTERNS
        .iter()
        .find_map(|p| p.regex.captures(message).map(|c| (p.locale, c)))?;

    let duration_seconds: i64 = caps["duration"].parse().ok()?;

    tracing::trace!(locale, user = &caps["user"], "matched disconnect record");

    Some(SessionEvent {
        disconnect_time,
        user_name: caps["user"].to_string(),
        client_ip: caps["ip"].to_string(),
        resource: caps["resource"].to_string(),
        duration_seconds,
        protocol: caps["protocol"].to_string(),
    })
}

/// Parses a batch of raw records, silently dropping records that yield no
/// event.
///
/// Records are independent, so extraction runs in parallel; output order
/// follows input order.
#[must_use]
pub fn parse_records(records: &[RawRecord]) -> Vec<SessionEvent> {
    records
        .par_iter()
        .filter_map(|record| {
            let event = parse_event(record.timestamp, &record.message);
            if event.is_none() {
                tracing::trace!(timestamp = %record.timestamp, "dropping unparseable record");
            }
            event
        })
        .collect()
}
