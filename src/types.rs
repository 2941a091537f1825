//! Shared data types for the aggregation engine.
//!
//! Everything here is a plain serde-serializable value the display layer can
//! consume as-is. Counter types are fixed structs rather than string-keyed
//! maps so a typo in a counter name is a compile error, not a silent zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status token for a task still in progress. Matched case-insensitively.
pub const STATUS_PENDING: &str = "PENDING";

/// Status token for a completed/finalized task. Matched case-insensitively.
pub const STATUS_LODGE: &str = "LODGE";

/// Document type whose completed tasks are measured against the TAT target.
/// Exact match — no other category contributes to the TAT counters.
pub const TAT_TRACKED_DOCUMENT_TYPE: &str = "Ecoll - Export Collection";

/// One processed document/task, as decoded from the workflow tool's export.
///
/// Immutable once constructed. A refresh cycle builds a whole new set and
/// discards the prior one; records are never merged or updated in place.
/// Absent fields decode to empty strings, never a null marker, so the
/// "empty means non-compliant / non-matching" predicates hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Creation date in `d-MMM-yy` textual form, month already normalized
    /// to its 3-letter English abbreviation at the ingestion boundary.
    pub date: String,
    pub document_type: String,
    pub document_serial: String,
    pub reference_number: String,
    pub amount: String,
    pub client_name: String,
    pub status: String,
    /// Turnaround duration in `H+:MM:SS` form, or empty.
    pub tat: String,
    pub handler: String,
    // Passthrough timestamps/durations — displayed, never parsed.
    pub application_received_at: String,
    pub scanned_at: String,
    pub total_time_at_branch: String,
    pub verified_at: String,
    pub total_time_for_verification: String,
    pub lodgement_started_at: String,
    pub confirmed_at: String,
    pub total_time_for_entry: String,
    pub compliance_verified_at: String,
    pub authorized_at: String,
}

impl TaskRecord {
    /// Task is still in progress (`PENDING`, any case).
    pub fn is_ongoing(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_PENDING)
    }

    /// Task has been completed (`LODGE`, any case).
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_LODGE)
    }

    /// Record belongs to the TAT-tracked document category.
    pub fn is_tat_tracked(&self) -> bool {
        self.document_type == TAT_TRACKED_DOCUMENT_TYPE
    }
}

/// Point-in-time counters over the full record set, computed once per
/// ingestion cycle. Read-only to consumers.
///
/// The percentages are `None` when no TAT-tracked task has completed —
/// "no data" is distinct from 0%.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCounters {
    pub new: u32,
    pub ongoing: u32,
    pub completed: u32,
    pub within_tat: u32,
    pub over_tat: u32,
    pub normal_percentage: Option<u32>,
    pub abnormal_percentage: Option<u32>,
}

/// Derived counts for one day's or one week's subset of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    /// Records dated the bucket's own date. Only the daily view carries
    /// this; week buckets report no new count and omit the field entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<u32>,
    pub ongoing: u32,
    pub completed: u32,
    pub within_tat: u32,
    pub over_tat: u32,
}

/// One business day with its record subset and derived counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    /// Textual date in the stored record format (`d-MMM-yy`).
    pub date: String,
    /// 3-letter English weekday abbreviation, e.g. "Mon".
    pub short_day_name: String,
    pub counts: StatusCounts,
    pub records: Vec<TaskRecord>,
}

/// One business week of the current month with its record subset and counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    /// Display label, `"Week N(MM.DD-MM.DD)"`.
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub counts: StatusCounts,
    pub records: Vec<TaskRecord>,
}
