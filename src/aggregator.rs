//! Aggregation over a record snapshot: global summary counters plus per-day
//! and per-week bucket views.
//!
//! The dashboard's three display surfaces (summary cards, charts, table
//! highlighting) all read numbers derived from the predicates in this one
//! module; nothing downstream recounts on its own. Summary computation is a
//! pure fold over an immutable slice — identical inputs always produce
//! identical counters, and no per-record failure ever aborts the pass.

use chrono::NaiveDate;

use crate::calendar;
use crate::dates;
use crate::error::Result;
use crate::store;
use crate::tat::TatPolicy;
use crate::types::{DayBucket, StatusCounts, SummaryCounters, TaskRecord, WeekBucket};

/// Compute the point-in-time summary over the full record set.
///
/// `current_date` is the injected "today" in the stored `d-MMM-yy` textual
/// form; the NEW counter uses exact string equality against it. WITHIN/OVER
/// TAT count only completed records of the tracked document category.
pub fn recompute_summary(
    records: &[TaskRecord],
    current_date: &str,
    policy: &TatPolicy,
) -> SummaryCounters {
    let mut summary = records
        .iter()
        .fold(SummaryCounters::default(), |mut acc, record| {
            if record.date == current_date {
                acc.new += 1;
            }
            if record.is_ongoing() {
                acc.ongoing += 1;
            }
            if record.is_completed() {
                acc.completed += 1;
                if record.is_tat_tracked() {
                    if policy.is_within_target(&record.tat) {
                        acc.within_tat += 1;
                    } else {
                        acc.over_tat += 1;
                    }
                }
            }
            acc
        });

    let lodged = summary.within_tat + summary.over_tat;
    if lodged > 0 {
        let normal = summary.within_tat * 100 / lodged;
        summary.normal_percentage = Some(normal);
        summary.abnormal_percentage = Some(100 - normal);
    }
    summary
}

/// Per-subset counts shared by the daily and weekly views.
///
/// `bucket_date` drives the `new` count: the daily view counts every record
/// dated the bucket's own date (which for a subset selected by that date is
/// the whole subset — the export calls these "new tasks" regardless of when
/// they actually entered the system). The weekly view passes `None` and
/// carries no new count at all.
pub fn status_counts(
    records: &[TaskRecord],
    bucket_date: Option<&str>,
    policy: &TatPolicy,
) -> StatusCounts {
    let mut counts = records
        .iter()
        .fold(StatusCounts::default(), |mut acc, record| {
            if record.is_ongoing() {
                acc.ongoing += 1;
            }
            if record.is_completed() {
                acc.completed += 1;
                if record.is_tat_tracked() {
                    if policy.is_within_target(&record.tat) {
                        acc.within_tat += 1;
                    } else {
                        acc.over_tat += 1;
                    }
                }
            }
            acc
        });
    counts.new = bucket_date
        .map(|date| records.iter().filter(|r| r.date == date).count() as u32);
    counts
}

/// One bucket per business day for the last `n` business days ending at
/// `today`, oldest first.
///
/// Operates on a record slice so callers can pass one published snapshot;
/// every bucket then derives from the same record set as the summary.
pub fn day_buckets(
    records: &[TaskRecord],
    today: NaiveDate,
    n: usize,
    policy: &TatPolicy,
) -> Result<Vec<DayBucket>> {
    let work_days = calendar::last_n_business_days(today, n)?;
    Ok(work_days
        .into_iter()
        .map(|work_day| {
            let date = dates::format_record_date(work_day.date);
            let records = store::filter_by_exact_date(records, &date);
            let counts = status_counts(&records, Some(&date), policy);
            DayBucket {
                date,
                short_day_name: work_day.short_day_name,
                counts,
                records,
            }
        })
        .collect())
}

/// One bucket per business week of the month containing `reference`.
///
/// Uses the same partition as the label-only listing, so the grouping and
/// the labels can never diverge.
pub fn week_buckets(
    records: &[TaskRecord],
    reference: NaiveDate,
    policy: &TatPolicy,
) -> Vec<WeekBucket> {
    calendar::monthly_business_weeks(reference)
        .into_iter()
        .map(|span| {
            let records = store::filter_by_date_range(records, span.start, span.end);
            let counts = status_counts(&records, None, policy);
            WeekBucket {
                label: span.label,
                start: span.start,
                end: span.end,
                counts,
                records,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TAT_TRACKED_DOCUMENT_TYPE;

    fn record(date: &str, status: &str, document_type: &str, tat: &str) -> TaskRecord {
        TaskRecord {
            date: date.to_string(),
            document_type: document_type.to_string(),
            document_serial: String::new(),
            reference_number: String::new(),
            amount: String::new(),
            client_name: String::new(),
            status: status.to_string(),
            tat: tat.to_string(),
            handler: String::new(),
            application_received_at: String::new(),
            scanned_at: String::new(),
            total_time_at_branch: String::new(),
            verified_at: String::new(),
            total_time_for_verification: String::new(),
            lodgement_started_at: String::new(),
            confirmed_at: String::new(),
            total_time_for_entry: String::new(),
            compliance_verified_at: String::new(),
            authorized_at: String::new(),
        }
    }

    fn acceptance_records() -> Vec<TaskRecord> {
        vec![
            record("1-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "03:59:59"),
            record("1-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "04:00:01"),
            record("1-Jan-25", "PENDING", "X", ""),
        ]
    }

    #[test]
    fn summary_matches_acceptance_fixture() {
        let summary = recompute_summary(&acceptance_records(), "1-Jan-25", &TatPolicy::default());
        assert_eq!(summary.new, 3);
        assert_eq!(summary.ongoing, 1);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.within_tat, 1);
        assert_eq!(summary.over_tat, 1);
        assert_eq!(summary.normal_percentage, Some(50));
        assert_eq!(summary.abnormal_percentage, Some(50));
    }

    #[test]
    fn summary_is_deterministic() {
        let records = acceptance_records();
        let policy = TatPolicy::default();
        let first = recompute_summary(&records, "1-Jan-25", &policy);
        let second = recompute_summary(&records, "1-Jan-25", &policy);
        assert_eq!(first, second);
    }

    #[test]
    fn percentages_absent_without_tat_tracked_completions() {
        let records = vec![record("1-Jan-25", "PENDING", "X", "")];
        let summary = recompute_summary(&records, "1-Jan-25", &TatPolicy::default());
        assert_eq!(summary.normal_percentage, None);
        assert_eq!(summary.abnormal_percentage, None);
    }

    #[test]
    fn percentage_floors_integer_division() {
        let records = vec![
            record("1-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "01:00:00"),
            record("1-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "05:00:00"),
            record("1-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "05:00:00"),
        ];
        let summary = recompute_summary(&records, "1-Jan-25", &TatPolicy::default());
        assert_eq!(summary.normal_percentage, Some(33));
        assert_eq!(summary.abnormal_percentage, Some(67));
    }

    #[test]
    fn other_document_types_never_touch_tat_counters() {
        let records = vec![record("1-Jan-25", "LODGE", "Import Bill", "00:10:00")];
        let summary = recompute_summary(&records, "1-Jan-25", &TatPolicy::default());
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.within_tat, 0);
        assert_eq!(summary.over_tat, 0);
    }

    #[test]
    fn status_matching_is_case_insensitive() {
        let records = vec![
            record("2-Jan-25", "lodge", TAT_TRACKED_DOCUMENT_TYPE, "00:30:00"),
            record("2-Jan-25", "Pending", "X", ""),
        ];
        let summary = recompute_summary(&records, "1-Jan-25", &TatPolicy::default());
        assert_eq!(summary.new, 0);
        assert_eq!(summary.ongoing, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.within_tat, 1);
    }

    #[test]
    fn unparsable_tat_counts_as_over_target() {
        let records = vec![record("1-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "oops")];
        let summary = recompute_summary(&records, "1-Jan-25", &TatPolicy::default());
        assert_eq!(summary.over_tat, 1);
        assert_eq!(summary.within_tat, 0);
    }

    #[test]
    fn day_buckets_cover_the_last_business_days() {
        let records = vec![
            record("6-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "01:00:00"),
            record("6-Jan-25", "PENDING", "X", ""),
            record("3-Jan-25", "LODGE", "X", "01:00:00"),
            // Saturday record: belongs to no bucket.
            record("4-Jan-25", "PENDING", "X", ""),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let buckets = day_buckets(&records, today, 5, &TatPolicy::default()).unwrap();

        assert_eq!(buckets.len(), 5);
        let monday = buckets.last().unwrap();
        assert_eq!(monday.date, "6-Jan-25");
        assert_eq!(monday.short_day_name, "Mon");
        assert_eq!(monday.counts.new, Some(2));
        assert_eq!(monday.counts.ongoing, 1);
        assert_eq!(monday.counts.completed, 1);
        assert_eq!(monday.counts.within_tat, 1);

        let friday = &buckets[3];
        assert_eq!(friday.date, "3-Jan-25");
        assert_eq!(friday.counts.completed, 1);
        // Not the tracked category, so no TAT contribution.
        assert_eq!(friday.counts.within_tat, 0);

        // An empty business day still reports a (zero) new count.
        assert_eq!(buckets[0].counts.new, Some(0));

        let all_bucketed: usize = buckets.iter().map(|b| b.records.len()).sum();
        assert_eq!(all_bucketed, 3);
    }

    #[test]
    fn week_buckets_group_by_date_range_without_new_counts() {
        let records = vec![
            record("2-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "02:00:00"),
            record("8-Jan-25", "PENDING", "X", ""),
            record("10-Jan-25", "LODGE", TAT_TRACKED_DOCUMENT_TYPE, "09:00:00"),
            record("bad-date", "PENDING", "X", ""),
        ];
        let reference = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let buckets = week_buckets(&records, reference, &TatPolicy::default());

        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].label, "Week 1(01.01-01.03)");
        assert_eq!(buckets[0].counts.completed, 1);
        assert_eq!(buckets[0].counts.within_tat, 1);

        assert_eq!(buckets[1].counts.ongoing, 1);
        assert_eq!(buckets[1].counts.over_tat, 1);

        // The weekly view carries no new count.
        assert!(buckets.iter().all(|b| b.counts.new.is_none()));
        // Unparsable dates land in no week.
        let grouped: usize = buckets.iter().map(|b| b.records.len()).sum();
        assert_eq!(grouped, 3);
    }

    #[test]
    fn weekly_json_omits_the_new_field() {
        let records = vec![record("2-Jan-25", "PENDING", "X", "")];
        let reference = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let policy = TatPolicy::default();

        let weeks = week_buckets(&records, reference, &policy);
        let week_json = serde_json::to_value(&weeks[0]).unwrap();
        assert!(week_json["counts"].get("new").is_none());

        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let days = day_buckets(&records, today, 5, &policy).unwrap();
        let day_json = serde_json::to_value(&days[0]).unwrap();
        assert_eq!(day_json["counts"]["new"], 0);
    }
}
