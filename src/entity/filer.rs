//! Filer registrations (`cand.csv`)

use serde::Serialize;

use super::{EntitySpec, Record, Rejection};
use crate::fields::{NameColumns, assemble_name, optional_text};
use crate::reader::RawRow;

pub const ID: &str = "filerIdent";
pub const TYPE: &str = "filerTypeCd";
pub const NAME_COLUMNS: NameColumns = NameColumns {
    organization: "filerName",
    last: "filerNameLast",
    first: "filerNameFirst",
    suffix: "filerNameSuffixCd",
};
pub const OFFICE_HELD: [&str; 2] = ["filerHoldOfficeCd", "ctaSeekOfficeCd"];
pub const OFFICE_DISTRICT: [&str; 2] = ["filerHoldOfficeDistrict", "ctaSeekOfficeDistrict"];
pub const OFFICE_COUNTY: [&str; 2] = ["filerHoldOfficeCountyDescr", "ctaSeekOfficeCountyDescr"];
pub const STATUS: [&str; 2] = ["filerFilerpersStatusCd", "committeeStatusCd"];
pub const CITY: &str = "filerStreetCity";
pub const STATE: &str = "filerStreetStateCd";

/// A registered candidate or committee
#[derive(Debug, Clone, PartialEq, Serialize, Record)]
#[record(kind = "Filer")]
pub struct Filer {
    #[record(id)]
    pub id: String,
    pub name: String,
    pub r#type: Option<String>,
    /// Filled in by a later enrichment pass, never by the import
    pub party: Option<String>,
    pub office_held: Option<String>,
    pub office_district: Option<String>,
    pub office_county: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Spec for filer imports
///
/// Filers are registered once, so the same identity appearing again in
/// `cand.csv` is dropped in favour of the first row.
#[must_use]
pub fn spec() -> EntitySpec<Filer> {
    EntitySpec {
        identity_column: ID,
        received_date_column: None,
        required_columns: &[],
        deduplicate: true,
        batch_size: 500,
        fallback_batch_size: 1,
        derive,
    }
}

fn derive(row: &RawRow) -> Result<Filer, Rejection> {
    let name = assemble_name(&NAME_COLUMNS.read(row), "");
    if name.is_empty() {
        return Err(Rejection::MissingField("name"));
    }

    Ok(Filer {
        id: row.get(ID).to_string(),
        name,
        r#type: optional_text(row.get(TYPE)),
        party: None,
        office_held: row.first_non_empty(&OFFICE_HELD),
        office_district: row.first_non_empty(&OFFICE_DISTRICT),
        office_county: row.first_non_empty(&OFFICE_COUNTY),
        status: row.first_non_empty(&STATUS),
        city: optional_text(row.get(CITY)),
        state: optional_text(row.get(STATE)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::date::ReceivedDateFilter;

    fn normalize(pairs: &[(&str, &str)]) -> Result<Filer, Rejection> {
        let row = RawRow::from_pairs(pairs.iter().copied());
        spec().normalize(&row, &ReceivedDateFilter::default())
    }

    #[test]
    fn organization_name_is_used_verbatim() {
        let filer = normalize(&[
            (ID, "00015234"),
            ("filerName", "Texans for Lawsuit Reform PAC"),
            ("filerNameLast", "Ignored"),
            (TYPE, "GPAC"),
        ])
        .unwrap();

        assert_eq!(filer.id, "00015234");
        assert_eq!(filer.name, "Texans for Lawsuit Reform PAC");
        assert_eq!(filer.r#type.as_deref(), Some("GPAC"));
        assert_eq!(filer.party, None);
    }

    #[test]
    fn name_assembled_from_parts() {
        let filer = normalize(&[
            (ID, "00067890"),
            ("filerNameLast", "Abbott"),
            ("filerNameFirst", "Greg"),
            ("filerNameSuffixCd", "JR"),
        ])
        .unwrap();
        assert_eq!(filer.name, "Abbott, Greg JR");
    }

    #[test]
    fn nameless_filer_is_rejected() {
        let result = normalize(&[(ID, "00067890"), (CITY, "AUSTIN"), (TYPE, "COH")]);
        assert_eq!(result.unwrap_err(), Rejection::MissingField("name"));
    }

    #[test]
    fn missing_identity_is_rejected() {
        let result = normalize(&[("filerName", "Somebody")]);
        assert_eq!(result.unwrap_err(), Rejection::MissingIdentity);
    }

    #[test]
    fn held_office_preferred_over_sought_office() {
        let filer = normalize(&[
            (ID, "1"),
            ("filerName", "X"),
            ("filerHoldOfficeCd", ""),
            ("ctaSeekOfficeCd", "STATEREP"),
            ("filerHoldOfficeDistrict", "12"),
            ("ctaSeekOfficeDistrict", "99"),
            ("committeeStatusCd", "ACTIVE"),
        ])
        .unwrap();

        assert_eq!(filer.office_held.as_deref(), Some("STATEREP"));
        assert_eq!(filer.office_district.as_deref(), Some("12"));
        assert_eq!(filer.office_county, None);
        assert_eq!(filer.status.as_deref(), Some("ACTIVE"));
    }

    #[test]
    fn columns_follow_field_order() {
        assert_eq!(Filer::columns()[0], "id");
        assert!(Filer::columns().contains(&"type"));
        assert_eq!(Filer::columns().len(), 10);
    }
}
