//! Error types for the aggregation engine.
//!
//! Only whole-ingestion failures and caller precondition violations surface
//! as errors. A malformed duration or date on a single record is a degraded
//! value (the record simply doesn't match the predicate) and must never
//! abort the pass over the remaining records.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller precondition violation, e.g. asking for zero business days.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The source workbook could not be opened or read at all.
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// A required column is missing from the export's header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The worksheet has no header row.
    #[error("Worksheet is empty")]
    EmptySheet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
