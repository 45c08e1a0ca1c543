//! Itemized expenditures (`expend_*.csv`)

use serde::Serialize;

use super::{EntitySpec, Record, Rejection};
use crate::fields::{NameColumns, UNKNOWN_NAME, assemble_name, optional_text, parse_amount, parse_date};
use crate::reader::RawRow;

pub const ID: &str = "expendInfoId";
pub const FILER_ID: &str = "filerIdent";
pub const FILER_NAME: &str = "filerName";
pub const PAYEE_NAME: NameColumns = NameColumns {
    organization: "payeeNameOrganization",
    last: "payeeNameLast",
    first: "payeeNameFirst",
    suffix: "payeeNameSuffixCd",
};
pub const PAYEE_CITY: &str = "payeeStreetCity";
pub const PAYEE_STATE: &str = "payeeStreetStateCd";
pub const AMOUNT: &str = "expendAmount";
pub const DATE: &str = "expendDt";
pub const CATEGORY: [&str; 2] = ["expendCatCd", "expendCatDescr"];
pub const DESCRIPTION: &str = "expendDescr";
pub const REPORT_ID: &str = "reportInfoIdent";
pub const RECEIVED: &str = "receivedDt";

/// One itemized payment made by a filer
#[derive(Debug, Clone, PartialEq, Serialize, Record)]
#[record(kind = "Expenditure")]
pub struct Expenditure {
    #[record(id)]
    pub id: String,
    pub filer_id: String,
    pub filer_name: Option<String>,
    pub payee_name: String,
    pub payee_city: Option<String>,
    pub payee_state: Option<String>,
    pub amount: f64,
    pub date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub report_id: Option<String>,
    pub received_date: Option<String>,
}

/// Spec for expenditure imports
#[must_use]
pub fn spec() -> EntitySpec<Expenditure> {
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

fn derive(row: &RawRow) -> Result<Expenditure, Rejection> {
    Ok(Expenditure {
        id: row.get(ID).to_string(),
        filer_id: row.get(FILER_ID).to_string(),
        filer_name: optional_text(row.get(FILER_NAME)),
        payee_name: assemble_name(&PAYEE_NAME.read(row), UNKNOWN_NAME),
        payee_city: optional_text(row.get(PAYEE_CITY)),
        payee_state: optional_text(row.get(PAYEE_STATE)),
        amount: parse_amount(row.get(AMOUNT)),
        date: parse_date(row.get(DATE)),
        category: row.first_non_empty(&CATEGORY),
        description: optional_text(row.get(DESCRIPTION)),
        report_id: optional_text(row.get(REPORT_ID)),
        received_date: parse_date(row.get(RECEIVED)),
    })
}
