//! Published aggregate snapshot and the read surface the display layer
//! pulls from.
//!
//! Refresh model: an external scheduler periodically decodes the source and
//! calls one of the `refresh_*` methods; consumers read whatever snapshot is
//! currently published. A refresh either publishes a fully-built snapshot or
//! leaves the prior one in place — readers never observe a half-built state,
//! and a failed ingestion cycle keeps serving the last good aggregates.

use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use crate::aggregator;
use crate::dates;
use crate::error::{EngineError, Result};
use crate::ingest;
use crate::store::{self, RecordStore};
use crate::tat::TatPolicy;
use crate::types::{DayBucket, SummaryCounters, TaskRecord, WeekBucket};

/// One refresh cycle's immutable aggregate view. The summary is computed
/// eagerly at construction from the same record set the snapshot carries.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Arc<Vec<TaskRecord>>,
    pub summary: SummaryCounters,
    /// The injected "today" this snapshot was computed against.
    pub as_of: NaiveDate,
}

/// The aggregation engine's public read surface.
///
/// Owns the record store and the published snapshot. Consumers (cards,
/// charts, table) only ever read; all mutation happens through `refresh_*`.
#[derive(Debug, Default)]
pub struct Dashboard {
    store: RecordStore,
    policy: TatPolicy,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl Dashboard {
    pub fn new(policy: TatPolicy) -> Self {
        Self {
            store: RecordStore::new(),
            policy,
            snapshot: RwLock::new(None),
        }
    }

    /// Replace the current cycle with already-decoded rows and publish a
    /// fresh snapshot computed against `today`.
    pub fn refresh_from_rows(&self, rows: Vec<TaskRecord>, today: NaiveDate) {
        let current_date = dates::format_record_date(today);
        self.store.load(rows);
        let records = self.store.all();
        let summary = aggregator::recompute_summary(&records, &current_date, &self.policy);
        log::debug!(
            "published snapshot: {} records as of {}",
            records.len(),
            current_date
        );
        let snapshot = Arc::new(Snapshot {
            records,
            summary,
            as_of: today,
        });
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(snapshot);
    }

    /// Decode an export workbook and refresh. On ingestion failure the prior
    /// snapshot stays published and the error is returned for the operator.
    pub fn refresh_from_workbook(&self, path: &Path, today: NaiveDate) -> Result<()> {
        match ingest::read_workbook(path) {
            Ok(rows) => {
                self.refresh_from_rows(rows, today);
                Ok(())
            }
            Err(e) => {
                log::warn!("refresh failed, keeping prior snapshot: {e}");
                Err(e)
            }
        }
    }

    /// The currently published snapshot, if any refresh has completed.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The published summary counters (defaults when nothing is loaded yet).
    pub fn summary(&self) -> SummaryCounters {
        self.snapshot()
            .map(|snap| snap.summary.clone())
            .unwrap_or_default()
    }

    pub fn new_count(&self) -> u32 {
        self.summary().new
    }

    pub fn ongoing_count(&self) -> u32 {
        self.summary().ongoing
    }

    pub fn completed_count(&self) -> u32 {
        self.summary().completed
    }

    pub fn within_tat_count(&self) -> u32 {
        self.summary().within_tat
    }

    pub fn over_tat_count(&self) -> u32 {
        self.summary().over_tat
    }

    pub fn normal_percentage(&self) -> Option<u32> {
        self.summary().normal_percentage
    }

    pub fn abnormal_percentage(&self) -> Option<u32> {
        self.summary().abnormal_percentage
    }

    /// The current cycle's full record set, insertion order preserved.
    pub fn all_records(&self) -> Arc<Vec<TaskRecord>> {
        self.snapshot()
            .map(|snap| Arc::clone(&snap.records))
            .unwrap_or_default()
    }

    /// Records for an exact stored date (normalized `d-MMM-yy` form), read
    /// from the published snapshot like every other accessor.
    pub fn records_for_date(&self, date: &str) -> Vec<TaskRecord> {
        store::filter_by_exact_date(&self.all_records(), date)
    }

    /// Day buckets for the last `n` business days ending at the published
    /// snapshot's "today". Empty before the first refresh.
    pub fn day_buckets(&self, n: usize) -> Result<Vec<DayBucket>> {
        if n == 0 {
            return Err(EngineError::InvalidArgument(
                "day_buckets requires n >= 1".to_string(),
            ));
        }
        match self.snapshot() {
            Some(snap) => aggregator::day_buckets(&snap.records, snap.as_of, n, &self.policy),
            None => Ok(Vec::new()),
        }
    }

    /// Week buckets for the month containing the published snapshot's
    /// "today". Empty before the first refresh.
    pub fn week_buckets(&self) -> Vec<WeekBucket> {
        match self.snapshot() {
            Some(snap) => aggregator::week_buckets(&snap.records, snap.as_of, &self.policy),
            None => Vec::new(),
        }
    }
}
