//! Cover-sheet reports (`cover.csv`)

use serde::Serialize;
use smallvec::SmallVec;

use super::{EntitySpec, Record, Rejection};
use crate::fields::{optional_text, parse_date, parse_optional_amount};
use crate::reader::RawRow;

pub const ID: &str = "reportInfoIdent";
pub const FILER_ID: &str = "filerIdent";
pub const FILER_NAME: &str = "filerName";
pub const PERIOD_START: &str = "periodStartDt";
pub const PERIOD_END: &str = "periodEndDt";
pub const FILED: &str = "filedDt";
pub const RECEIVED: &str = "receivedDt";
pub const TOTAL_CONTRIBUTIONS: &str = "totalContribAmount";
pub const TOTAL_EXPENDITURES: &str = "totalExpendAmount";
pub const CASH_ON_HAND: &str = "contribsMaintainedAmount";

/// The ten report-type code columns, in order
pub const REPORT_TYPE_COLUMNS: [&str; 10] = [
    "reportTypeCd1",
    "reportTypeCd2",
    "reportTypeCd3",
    "reportTypeCd4",
    "reportTypeCd5",
    "reportTypeCd6",
    "reportTypeCd7",
    "reportTypeCd8",
    "reportTypeCd9",
    "reportTypeCd10",
];

/// A periodic cover sheet with aggregate totals
#[derive(Debug, Clone, PartialEq, Serialize, Record)]
#[record(kind = "Report")]
pub struct Report {
    #[record(id)]
    pub id: String,
    pub filer_id: String,
    pub filer_name: Option<String>,
    pub report_type: Option<String>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub filed_date: Option<String>,
    pub received_date: Option<String>,
    pub total_contributions: Option<f64>,
    pub total_expenditures: Option<f64>,
    pub cash_on_hand: Option<f64>,
}

/// Spec for report imports
#[must_use]
pub fn spec() -> EntitySpec<Report> {
    EntitySpec {
        identity_column: ID,
        received_date_column: Some(RECEIVED),
        required_columns: &[(FILER_ID, "filer_id")],
        deduplicate: false,
        batch_size: 500,
        fallback_batch_size: 1,
        derive,
    }
}

/// Join the populated report-type codes with `", "`
///
/// Returns `None` when none of the ten columns carries a value.
#[must_use]
pub fn aggregate_report_types(row: &RawRow) -> Option<String> {
    let codes: SmallVec<[&str; 10]> = REPORT_TYPE_COLUMNS
        .iter()
        .map(|column| row.get(column).trim())
        .filter(|code| !code.is_empty())
        .collect();

    if codes.is_empty() {
        None
    } else {
        Some(codes.join(", "))
    }
}

fn derive(row: &RawRow) -> Result<Report, Rejection> {
    Ok(Report {
        id: row.get(ID).to_string(),
        filer_id: row.get(FILER_ID).to_string(),
        filer_name: optional_text(row.get(FILER_NAME)),
        report_type: aggregate_report_types(row),
        period_start: parse_date(row.get(PERIOD_START)),
        period_end: parse_date(row.get(PERIOD_END)),
        filed_date: parse_date(row.get(FILED)),
        received_date: parse_date(row.get(RECEIVED)),
        total_contributions: parse_optional_amount(row.get(TOTAL_CONTRIBUTIONS)),
        total_expenditures: parse_optional_amount(row.get(TOTAL_EXPENDITURES)),
        cash_on_hand: parse_optional_amount(row.get(CASH_ON_HAND)),
    })
}
