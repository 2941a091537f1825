//! Record-date handling: the `d-MMM-yy` textual form and month-name
//! normalization.
//!
//! The workflow export localizes month names. All locale mapping lives here,
//! applied once at the ingestion boundary, so the engine's calendar
//! arithmetic only ever sees structured dates or the normalized text form.

use chrono::NaiveDate;

/// Textual record-date format, e.g. `1-Jan-25`. The day is unpadded; the
/// year is two digits (chrono's 2000-pivot `%y`).
pub const RECORD_DATE_FORMAT: &str = "%-d-%b-%y";

/// Map a localized month name to its 3-letter English abbreviation.
/// Anything unrecognized passes through unchanged.
pub fn normalize_month_name(month: &str) -> &str {
    match month {
        "一月" => "Jan",
        "二月" => "Feb",
        "三月" => "Mar",
        "四月" => "Apr",
        "五月" => "May",
        "六月" => "Jun",
        "七月" => "Jul",
        "八月" => "Aug",
        "九月" => "Sep",
        "十月" => "Oct",
        "十一月" => "Nov",
        "十二月" => "Dec",
        other => other,
    }
}

/// Normalize the month component of a `d-MMM-yy` date string. Input that
/// does not have three `-`-separated parts passes through unchanged.
pub fn normalize_record_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() != 3 {
        return date.to_string();
    }
    format!("{}-{}-{}", parts[0], normalize_month_name(parts[1]), parts[2])
}

/// Parse a record date, normalizing the month name first.
/// Returns `None` for anything unparsable — lenient by contract.
pub fn parse_record_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_record_date(date), RECORD_DATE_FORMAT).ok()
}

/// Format a calendar date back into the stored textual form.
pub fn format_record_date(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}
