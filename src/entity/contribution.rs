//! Itemized contributions (`contribs_*.csv`)

use serde::Serialize;

use super::{EntitySpec, Record, Rejection};
use crate::fields::{NameColumns, UNKNOWN_NAME, assemble_name, optional_text, parse_amount, parse_date};
use crate::reader::RawRow;

pub const ID: &str = "contributionInfoId";
pub const FILER_ID: &str = "filerIdent";
pub const FILER_NAME: &str = "filerName";
pub const CONTRIBUTOR_NAME: NameColumns = NameColumns {
    organization: "contributorNameOrganization",
    last: "contributorNameLast",
    first: "contributorNameFirst",
    suffix: "contributorNameSuffixCd",
};
pub const CONTRIBUTOR_TYPE: &str = "contributorPersentTypeCd";
pub const CONTRIBUTOR_CITY: &str = "contributorStreetCity";
pub const CONTRIBUTOR_STATE: &str = "contributorStreetStateCd";
pub const CONTRIBUTOR_EMPLOYER: &str = "contributorEmployer";
pub const CONTRIBUTOR_OCCUPATION: &str = "contributorOccupation";
pub const AMOUNT: &str = "contributionAmount";
pub const DATE: &str = "contributionDt";
pub const DESCRIPTION: &str = "contributionDescr";
pub const REPORT_ID: &str = "reportInfoIdent";
pub const RECEIVED: &str = "receivedDt";

/// One itemized contribution received by a filer
#[derive(Debug, Clone, PartialEq, Serialize, Record)]
#[record(kind = "Contribution")]
pub struct Contribution {
    #[record(id)]
    pub id: String,
    pub filer_id: String,
    pub filer_name: Option<String>,
    pub contributor_name: String,
    pub contributor_type: Option<String>,
    pub contributor_city: Option<String>,
    pub contributor_state: Option<String>,
    pub contributor_employer: Option<String>,
    pub contributor_occupation: Option<String>,
    pub amount: f64,
    pub date: Option<String>,
    pub description: Option<String>,
    pub report_id: Option<String>,
    pub received_date: Option<String>,
}

/// Spec for contribution imports
#[must_use]
pub fn spec() -> EntitySpec<Contribution> {
    EntitySpec {
        identity_column: ID,
        received_date_column: Some(RECEIVED),
        required_columns: &[(FILER_ID, "filer_id")],
        deduplicate: false,
        batch_size: 1000,
        fallback_batch_size: 100,
        derive,
    }
}

fn derive(row: &RawRow) -> Result<Contribution, Rejection> {
    Ok(Contribution {
        id: row.get(ID).to_string(),
        filer_id: row.get(FILER_ID).to_string(),
        filer_name: optional_text(row.get(FILER_NAME)),
        contributor_name: assemble_name(&CONTRIBUTOR_NAME.read(row), UNKNOWN_NAME),
        contributor_type: optional_text(row.get(CONTRIBUTOR_TYPE)),
        contributor_city: optional_text(row.get(CONTRIBUTOR_CITY)),
        contributor_state: optional_text(row.get(CONTRIBUTOR_STATE)),
        contributor_employer: optional_text(row.get(CONTRIBUTOR_EMPLOYER)),
        contributor_occupation: optional_text(row.get(CONTRIBUTOR_OCCUPATION)),
        amount: parse_amount(row.get(AMOUNT)),
        date: parse_date(row.get(DATE)),
        description: optional_text(row.get(DESCRIPTION)),
        report_id: optional_text(row.get(REPORT_ID)),
        received_date: parse_date(row.get(RECEIVED)),
    })
}
