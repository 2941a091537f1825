//! In-memory record store for the current ingestion cycle.

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use crate::dates;
use crate::types::TaskRecord;

/// Owns the task records decoded in the current refresh cycle.
///
/// `load` swaps in a whole new `Arc`'d set, so readers always observe either
/// the fully-old or fully-new records — never a partially replaced set —
/// even under concurrent access. Records are replaced, never merged.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<Arc<Vec<TaskRecord>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire record set with this cycle's rows.
    ///
    /// A poisoned lock is recovered rather than dropping the new cycle —
    /// the store must never silently serve stale or empty data.
    pub fn load(&self, rows: Vec<TaskRecord>) {
        let fresh = Arc::new(rows);
        let mut guard = self.records.write().unwrap_or_else(|e| e.into_inner());
        *guard = fresh;
    }

    /// The current record set, insertion order preserved.
    pub fn all(&self) -> Arc<Vec<TaskRecord>> {
        let guard = self.records.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Records whose stored `date` equals `date` exactly.
    ///
    /// The comparison is purely textual; callers must pass the same
    /// normalized `d-MMM-yy` form the records were stored with.
    pub fn by_exact_date(&self, date: &str) -> Vec<TaskRecord> {
        filter_by_exact_date(&self.all(), date)
    }

    /// Records whose date parses and falls within `[start, end]` inclusive.
    ///
    /// A record whose date fails to parse is silently excluded — a known
    /// leniency, not an error.
    pub fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<TaskRecord> {
        filter_by_date_range(&self.all(), start, end)
    }
}

/// Exact textual date filter over a record slice. Shared by the store and
/// by snapshot-based reads so both paths select identically.
pub fn filter_by_exact_date(records: &[TaskRecord], date: &str) -> Vec<TaskRecord> {
    records
        .iter()
        .filter(|record| record.date == date)
        .cloned()
        .collect()
}

/// Inclusive date-range filter over a record slice. Records whose dates
/// fail to parse are silently excluded.
pub fn filter_by_date_range(
    records: &[TaskRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<TaskRecord> {
    records
        .iter()
        .filter(|record| {
            matches!(
                dates::parse_record_date(&record.date),
                Some(d) if d >= start && d <= end
            )
        })
        .cloned()
        .collect()
}
