//! Business-day and business-week calendar partitioning.
//!
//! Every function takes its reference date as an argument; nothing in this
//! module reads the system clock, so day and week partitions are
//! deterministic and testable.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{EngineError, Result};

/// One qualifying business day in the "last N business days" walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDay {
    pub date: NaiveDate,
    /// 3-letter English weekday abbreviation, e.g. "Mon".
    pub short_day_name: String,
}

/// One Monday-start business-week span of a month, possibly clipped at the
/// month boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSpan {
    /// Display label, `"Week N(MM.DD-MM.DD)"`, from the span's actual
    /// start/end dates.
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The last `n` business days ending at `today` (inclusive if `today` is a
/// weekday), oldest first.
///
/// Walks backward day by day, keeping non-weekend days until `n` are
/// collected. `n == 0` is a precondition violation.
pub fn last_n_business_days(today: NaiveDate, n: usize) -> Result<Vec<WorkDay>> {
    if n == 0 {
        return Err(EngineError::InvalidArgument(
            "last_n_business_days requires n >= 1".to_string(),
        ));
    }

    let mut days = Vec::with_capacity(n);
    let mut cursor = today;
    while days.len() < n {
        if !is_weekend(cursor) {
            days.push(WorkDay {
                date: cursor,
                short_day_name: cursor.format("%a").to_string(),
            });
        }
        cursor -= Duration::days(1);
    }
    days.reverse();
    Ok(days)
}

/// Partition the month containing `reference` into contiguous weekday spans.
///
/// Starts at the month's first weekday (a weekend start skips forward).
/// Each span ends at the earlier of the next Friday or the last day of the
/// month, then the cursor steps past the weekend. Week numbers start at 1.
///
/// Both the label-only listing and the task-grouping listing must be driven
/// by this single partition; they must never diverge.
pub fn monthly_business_weeks(reference: NaiveDate) -> Vec<WeekSpan> {
    let first = reference
        .with_day(1)
        .expect("day 1 is valid for every month");
    let last = last_day_of_month(reference);

    let mut spans = Vec::new();
    let mut cursor = first;
    let mut week_number = 1u32;

    while cursor <= last {
        if is_weekend(cursor) {
            cursor += Duration::days(1);
            continue;
        }

        // Advance to Friday or the month's last day, whichever comes first.
        let mut end = cursor;
        while end < last && end.weekday() != Weekday::Fri {
            end += Duration::days(1);
        }

        spans.push(WeekSpan {
            label: format!(
                "Week {}({}-{})",
                week_number,
                cursor.format("%m.%d"),
                end.format("%m.%d")
            ),
            start: cursor,
            end,
        });
        week_number += 1;

        cursor = end + Duration::days(1);
        while cursor <= last && is_weekend(cursor) {
            cursor += Duration::days(1);
        }
    }

    spans
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month is always valid");
    first_of_next - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn walks_back_over_a_weekend() {
        // Monday 2025-01-06: the five days are Tue Dec 31 .. Mon Jan 6.
        let days = last_n_business_days(day(2025, 1, 6), 5).unwrap();
        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                day(2024, 12, 31),
                day(2025, 1, 1),
                day(2025, 1, 2),
                day(2025, 1, 3),
                day(2025, 1, 6),
            ]
        );
        assert_eq!(days[0].short_day_name, "Tue");
        assert_eq!(days[4].short_day_name, "Mon");
    }

    #[test]
    fn weekend_today_is_excluded() {
        // Saturday 2025-01-04 is not itself a business day.
        let days = last_n_business_days(day(2025, 1, 4), 5).unwrap();
        assert_eq!(days.last().unwrap().date, day(2025, 1, 3));
    }

    #[test]
    fn never_yields_weekends_and_is_ascending() {
        for offset in 0..14 {
            let today = day(2025, 3, 3) + Duration::days(offset);
            let days = last_n_business_days(today, 5).unwrap();
            assert_eq!(days.len(), 5);
            assert!(days.iter().all(|d| !is_weekend(d.date)));
            assert!(days.windows(2).all(|w| w[0].date < w[1].date));
        }
    }

    #[test]
    fn zero_days_is_invalid() {
        let err = last_n_business_days(day(2025, 1, 6), 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn partitions_a_month_starting_midweek() {
        // January 2025 starts on a Wednesday.
        let spans = monthly_business_weeks(day(2025, 1, 15));
        let labels: Vec<&str> = spans.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Week 1(01.01-01.03)",
                "Week 2(01.06-01.10)",
                "Week 3(01.13-01.17)",
                "Week 4(01.20-01.24)",
                "Week 5(01.27-01.31)",
            ]
        );
    }

    #[test]
    fn weekend_month_start_skips_forward() {
        // February 2025 starts on a Saturday; the first span begins Monday
        // the 3rd, and the month ends on Friday the 28th.
        let spans = monthly_business_weeks(day(2025, 2, 10));
        assert_eq!(spans.first().unwrap().start, day(2025, 2, 3));
        assert_eq!(spans.last().unwrap().end, day(2025, 2, 28));
        assert_eq!(spans.len(), 4);
    }

    #[test]
    fn final_span_clips_at_month_end() {
        // April 2025 ends on Wednesday the 30th.
        let spans = monthly_business_weeks(day(2025, 4, 1));
        let last = spans.last().unwrap();
        assert_eq!(last.start, day(2025, 4, 28));
        assert_eq!(last.end, day(2025, 4, 30));
        assert_eq!(last.label, "Week 5(04.28-04.30)");
    }

    #[test]
    fn spans_cover_every_weekday_exactly_once() {
        for month in 1..=12 {
            let reference = day(2025, month, 15);
            let spans = monthly_business_weeks(reference);

            assert!(spans.windows(2).all(|w| w[0].start < w[1].start));
            for span in &spans {
                assert!(!is_weekend(span.start));
                assert!(!is_weekend(span.end));
                assert!(span.start <= span.end);
                // No span crosses a weekend gap.
                assert!(span.end - span.start <= Duration::days(4));
            }

            let mut cursor = reference.with_day(1).unwrap();
            let last = last_day_of_month(reference);
            while cursor <= last {
                let covering = spans
                    .iter()
                    .filter(|s| s.start <= cursor && cursor <= s.end)
                    .count();
                assert_eq!(
                    covering,
                    usize::from(!is_weekend(cursor)),
                    "{cursor} covered {covering} times"
                );
                cursor += Duration::days(1);
            }
        }
    }
}
