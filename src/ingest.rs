//! Workbook ingestion: one export sheet row in, one [`TaskRecord`] out.
//!
//! The workflow tool exports an XLSX workbook whose first sheet carries a
//! header row with the column titles below. Columns are located by title,
//! not position. Missing or empty cells decode to empty strings so the
//! downstream "empty means non-compliant / non-matching" contracts hold,
//! and record dates are locale-normalized here so the rest of the engine
//! never sees a localized month name.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::dates;
use crate::error::{EngineError, Result};
use crate::types::TaskRecord;

// Column titles exactly as the workflow tool writes them. The amount and
// client-name columns carry legacy report titles.
const COL_DATE: &str = "Date";
const COL_DOCUMENT_TYPE: &str = "DocumentType";
const COL_DOCUMENT_SERIAL: &str = "DocumentSerial";
const COL_REFERENCE_NUMBER: &str = "ReferenceNumber";
const COL_AMOUNT: &str = "DetailType (Customer)";
const COL_CLIENT_NAME: &str = "Description (ClientDetail)";
const COL_STATUS: &str = "Status";
const COL_TAT: &str = "TAT";
const COL_HANDLER: &str = "AuthorizedBy";
const COL_APPLICATION_RECEIVED_AT: &str = "ApplicationReceivedAt";
const COL_SCANNED_AT: &str = "ScannedAt";
const COL_TOTAL_TIME_AT_BRANCH: &str = "TotalTimeAtBranch";
const COL_VERIFIED_AT: &str = "VerifiedAt";
const COL_TOTAL_TIME_FOR_VERIFICATION: &str = "TotalTimeForVerification";
const COL_LODGEMENT_STARTED_AT: &str = "LodgementStartedAt";
const COL_CONFIRMED_AT: &str = "ConfirmedAt";
const COL_TOTAL_TIME_FOR_ENTRY: &str = "TotalTimeForEntry";
const COL_COMPLIANCE_VERIFIED_AT: &str = "ComplianceVerifiedAt";
const COL_AUTHORIZED_AT: &str = "AuthorizedAt";

/// Header-row column positions. The semantically significant columns are
/// required; passthrough columns may be absent and decode to empty strings.
#[derive(Debug)]
struct Columns {
    date: usize,
    document_type: usize,
    status: usize,
    tat: usize,
    document_serial: Option<usize>,
    reference_number: Option<usize>,
    amount: Option<usize>,
    client_name: Option<usize>,
    handler: Option<usize>,
    application_received_at: Option<usize>,
    scanned_at: Option<usize>,
    total_time_at_branch: Option<usize>,
    verified_at: Option<usize>,
    total_time_for_verification: Option<usize>,
    lodgement_started_at: Option<usize>,
    confirmed_at: Option<usize>,
    total_time_for_entry: Option<usize>,
    compliance_verified_at: Option<usize>,
    authorized_at: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let required = |title: &str| -> Result<usize> {
            header
                .iter()
                .position(|cell| cell == title)
                .ok_or_else(|| EngineError::MissingColumn(title.to_string()))
        };
        let optional = |title: &str| header.iter().position(|cell| cell == title);

        Ok(Self {
            date: required(COL_DATE)?,
            document_type: required(COL_DOCUMENT_TYPE)?,
            status: required(COL_STATUS)?,
            tat: required(COL_TAT)?,
            document_serial: optional(COL_DOCUMENT_SERIAL),
            reference_number: optional(COL_REFERENCE_NUMBER),
            amount: optional(COL_AMOUNT),
            client_name: optional(COL_CLIENT_NAME),
            handler: optional(COL_HANDLER),
            application_received_at: optional(COL_APPLICATION_RECEIVED_AT),
            scanned_at: optional(COL_SCANNED_AT),
            total_time_at_branch: optional(COL_TOTAL_TIME_AT_BRANCH),
            verified_at: optional(COL_VERIFIED_AT),
            total_time_for_verification: optional(COL_TOTAL_TIME_FOR_VERIFICATION),
            lodgement_started_at: optional(COL_LODGEMENT_STARTED_AT),
            confirmed_at: optional(COL_CONFIRMED_AT),
            total_time_for_entry: optional(COL_TOTAL_TIME_FOR_ENTRY),
            compliance_verified_at: optional(COL_COMPLIANCE_VERIFIED_AT),
            authorized_at: optional(COL_AUTHORIZED_AT),
        })
    }

    fn decode_row(&self, row: &[Data]) -> TaskRecord {
        let cell = |index: usize| row.get(index).map(cell_to_string).unwrap_or_default();
        let opt_cell = |index: Option<usize>| index.map(|i| cell(i)).unwrap_or_default();

        TaskRecord {
            date: dates::normalize_record_date(&cell(self.date)),
            document_type: cell(self.document_type),
            status: cell(self.status),
            tat: cell(self.tat),
            document_serial: opt_cell(self.document_serial),
            reference_number: opt_cell(self.reference_number),
            amount: opt_cell(self.amount),
            client_name: opt_cell(self.client_name),
            handler: opt_cell(self.handler),
            application_received_at: opt_cell(self.application_received_at),
            scanned_at: opt_cell(self.scanned_at),
            total_time_at_branch: opt_cell(self.total_time_at_branch),
            verified_at: opt_cell(self.verified_at),
            total_time_for_verification: opt_cell(self.total_time_for_verification),
            lodgement_started_at: opt_cell(self.lodgement_started_at),
            confirmed_at: opt_cell(self.confirmed_at),
            total_time_for_entry: opt_cell(self.total_time_for_entry),
            compliance_verified_at: opt_cell(self.compliance_verified_at),
            authorized_at: opt_cell(self.authorized_at),
        }
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Read the first worksheet of an export workbook into task records.
///
/// Fails only for whole-file problems (unreadable workbook, no header row,
/// required column absent). Individual rows always decode; odd cell values
/// become degraded strings the aggregation predicates treat as non-matching.
pub fn read_workbook(path: &Path) -> Result<Vec<TaskRecord>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| EngineError::Workbook(format!("{}: {}", path.display(), e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(EngineError::EmptySheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| EngineError::Workbook(format!("{}: {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or(EngineError::EmptySheet)?
        .iter()
        .map(cell_to_string)
        .collect();
    let columns = Columns::from_header(&header)?;

    let records: Vec<TaskRecord> = rows.map(|row| columns.decode_row(row)).collect();
    log::debug!(
        "decoded {} records from {} ({})",
        records.len(),
        path.display(),
        sheet_name
    );
    Ok(records)
}
