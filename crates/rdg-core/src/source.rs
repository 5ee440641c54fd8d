//! Record acquisition seam between the engine and the log store.
//!
//! The engine never talks to an event log itself; it consumes a materialized
//! batch of `(timestamp, message)` pairs for a query window. Anything that
//! can produce such a batch (a file, a remote collector, a test fixture)
//! implements [`RecordSource`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by record sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One raw audit-log record: a disconnect instant plus the free-text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Host the record was collected from, for multi-machine stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
}

/// Time window and scope for a record query. The window is inclusive on both
/// ends; `since > to` simply selects nothing.
#[derive(Debug, Clone)]
pub struct RecordQuery {
    pub since: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// Opaque to the engine; sources may use it to scope which host's
    /// records are returned.
    pub machine_name: Option<String>,
}

impl RecordQuery {
    /// Whether `timestamp` falls inside the query window.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.since && timestamp <= self.to
    }
}

/// Supplier of raw records for a query window.
pub trait RecordSource {
    /// Returns the records within the query window, in store order.
    fn records(&self, query: &RecordQuery) -> Result<Vec<RawRecord>, SourceError>;
}

/// Reads records from a JSON Lines file, one [`RawRecord`] per line.
///
/// Blank and malformed lines are skipped with a warning rather than failing
/// the query; the store is append-only and a torn tail line is expected.
#[derive(Debug, Clone)]
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonlSource {
    fn records(&self, query: &RecordQuery) -> Result<Vec<RawRecord>, SourceError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: RawRecord = match serde_json::from_str(&line) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(path = ?self.path, line = line_no + 1, error = %e, "skipping malformed record line");
                    continue;
                }
            };

            if !query.contains(record.timestamp) {
                continue;
            }
            if query
                .machine_name
                .as_deref()
                .is_some_and(|m| record.machine.as_deref() != Some(m))
            {
                continue;
            }

            records.push(record);
        }

        Ok(records)
    }
}
