//! Reconciliation engine for gateway disconnect audit logs.
//!
//! Takes raw, free-text disconnect records (English or Russian message
//! templates) and produces:
//! - clean, non-overlapping per-user session intervals ([`deduplicate`]),
//! - optionally gap-merged longer sessions ([`merge_sessions`]),
//! - per-user and per-day usage summaries ([`summarize`], [`summarize_daily`]).
//!
//! Everything is a pure, synchronous transformation over an in-memory batch;
//! the only fallible boundary is the [`RecordSource`] that supplies records.
//!
//! One asymmetry is intentional and load-bearing: interval reconciliation
//! groups users case-insensitively, while the summary reductions group by
//! exact name. Consumers of the summaries rely on seeing names exactly as
//! logged, so the mismatch is kept rather than unified.

pub mod dedup;
pub mod event;
pub mod merge;
pub mod parser;
pub mod source;
pub mod summary;
pub mod tracker;

pub use dedup::{DedupPolicy, deduplicate};
pub use event::SessionEvent;
pub use merge::merge_sessions;
pub use parser::{parse_event, parse_records};
pub use source::{JsonlSource, RawRecord, RecordQuery, RecordSource, SourceError};
pub use summary::{UserDailySession, UserSummary, summarize, summarize_daily};
pub use tracker::SessionTracker;
