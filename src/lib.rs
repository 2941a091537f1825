//! taskpulse — aggregation engine for a document-processing task dashboard.
//!
//! Ingests a flat export of task records and produces the aggregates a
//! live-refreshing dashboard displays: point-in-time summary counters,
//! TAT (turnaround time) compliance against a configurable target, per-day
//! breakdowns over the last N business days, and per-business-week
//! breakdowns of the current month.
//!
//! The GUI, chart, and table layers are external collaborators: they pull
//! read-only views from [`state::Dashboard`] on render and on each refresh
//! tick, and never mutate engine state. "Today" is injected everywhere so
//! every aggregate is deterministic and testable.

pub mod aggregator;
pub mod calendar;
pub mod dates;
pub mod error;
pub mod ingest;
pub mod state;
pub mod store;
pub mod tat;
pub mod types;

pub use error::{EngineError, Result};
pub use state::{Dashboard, Snapshot};
pub use tat::TatPolicy;
pub use types::{DayBucket, StatusCounts, SummaryCounters, TaskRecord, WeekBucket};
