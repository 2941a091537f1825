//! CLI entry: ingest an export workbook and print the dashboard aggregates
//! as JSON. This is the only place the system clock is read.

use std::path::PathBuf;
use std::process::ExitCode;

use taskpulse::{Dashboard, TatPolicy};

/// Day window for the daily breakdown, matching the dashboard's bar chart.
const DAY_WINDOW: usize = 5;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: taskpulse <export.xlsx>");
        return ExitCode::from(2);
    };

    let dashboard = Dashboard::new(TatPolicy::default());
    let today = chrono::Local::now().date_naive();

    if let Err(e) = dashboard.refresh_from_workbook(&path, today) {
        log::error!("failed to ingest {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    let days = match dashboard.day_buckets(DAY_WINDOW) {
        Ok(days) => days,
        Err(e) => {
            log::error!("failed to build day buckets: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = serde_json::json!({
        "summary": dashboard.summary(),
        "days": days,
        "weeks": dashboard.week_buckets(),
        "recordCount": dashboard.all_records().len(),
    });

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}
