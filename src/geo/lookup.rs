//! Static city → county/region lookup built from a gazetteer
//!
//! Input is a city gazetteer CSV with at least `city`, `state_id`,
//! `county_name` and `county_fips` columns (the Simplemaps US cities layout).

use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::normalize::normalize_city;
use crate::error::{LoaderError, Result};
use crate::error::util::safe_create_file;
use crate::reader::{CsvRowReader, RawRow};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub const CITY_COLUMN: &str = "city";
pub const STATE_COLUMN: &str = "state_id";
pub const COUNTY_COLUMN: &str = "county_name";
pub const COUNTY_FIPS_COLUMN: &str = "county_fips";

/// Credit line required by the gazetteer's license
pub const ATTRIBUTION: &str = "City data from Simplemaps.com (CC-BY 4.0)";

/// A named metro region and its member counties
pub type Region = (&'static str, &'static [&'static str]);

/// Texas metro regions, in the order they are reported
pub const TEXAS_REGIONS: &[Region] = &[
    (
        "DFW",
        &[
            "Collin", "Dallas", "Denton", "Ellis", "Hunt", "Kaufman", "Rockwall", "Tarrant",
            "Johnson", "Parker", "Wise", "Hood", "Somervell",
        ],
    ),
    (
        "Houston",
        &[
            "Harris",
            "Fort Bend",
            "Montgomery",
            "Brazoria",
            "Galveston",
            "Chambers",
            "Liberty",
            "Waller",
            "Austin",
        ],
    ),
    (
        "San Antonio",
        &[
            "Bexar", "Comal", "Guadalupe", "Kendall", "Medina", "Wilson", "Atascosa", "Bandera",
        ],
    ),
    ("Austin", &["Travis", "Williamson", "Hays", "Bastrop", "Caldwell"]),
    ("El Paso", &["El Paso", "Hudspeth"]),
    ("Rio Grande Valley", &["Cameron", "Hidalgo", "Starr", "Willacy"]),
];

/// First region whose county list contains `county`
///
/// Matching is exact and case-sensitive. Note that Austin County belongs to
/// the Houston region, not to the Austin region.
#[must_use]
pub fn region_for_county(regions: &[Region], county: &str) -> Option<&'static str> {
    regions
        .iter()
        .find(|(_, counties)| counties.contains(&county))
        .map(|(name, _)| *name)
}

/// Lookup entry for one normalized city name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityEntry {
    pub county: String,
    pub county_fips: String,
    pub region: Option<&'static str>,
}

/// Region table serialized as a JSON object in declaration order
#[derive(Debug, Clone, Copy)]
pub struct RegionTable(pub &'static [Region]);

impl Serialize for RegionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, counties) in self.0 {
            map.serialize_entry(name, counties)?;
        }
        map.end()
    }
}

/// The lookup file contents
#[derive(Debug, Clone, Serialize)]
pub struct GeoLookup {
    pub cities: BTreeMap<String, CityEntry>,
    pub counties: Vec<String>,
    pub regions: RegionTable,
    pub attribution: &'static str,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

impl GeoLookup {
    /// Write as pretty-printed JSON, creating parent directories
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = safe_create_file(path, "writing geo lookup")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer
            .flush()
            .map_err(|e| LoaderError::io("Failed to write geo lookup", e).with_path(path))?;
        Ok(())
    }
}

/// Accumulates gazetteer rows into a [`GeoLookup`]
#[derive(Debug, Clone)]
pub struct GeoLookupBuilder {
    state: String,
    regions: &'static [Region],
    cities: BTreeMap<String, CityEntry>,
    counties: BTreeSet<String>,
}

impl GeoLookupBuilder {
    /// Builder for one state's rows, using the Texas region table
    #[must_use]
    pub fn new(state: impl Into<String>) -> Self {
        Self::with_regions(state, TEXAS_REGIONS)
    }

    /// Builder with a custom region table
    #[must_use]
    pub fn with_regions(state: impl Into<String>, regions: &'static [Region]) -> Self {
        Self {
            state: state.into(),
            regions,
            cities: BTreeMap::new(),
            counties: BTreeSet::new(),
        }
    }

    /// Offer one gazetteer row
    ///
    /// Rows from another state, or with a blank city or county, are skipped.
    /// Every accepted county joins the county set, but a city keeps the
    /// entry of its first accepted row.
    ///
    /// # Returns
    /// `true` if the row added a new city
    pub fn add_row(&mut self, row: &RawRow) -> bool {
        if row.get(STATE_COLUMN) != self.state {
            return false;
        }

        let city = row.get(CITY_COLUMN).trim();
        let county = row.get(COUNTY_COLUMN).trim();
        if city.is_empty() || county.is_empty() {
            return false;
        }

        self.counties.insert(county.to_string());

        let normalized = normalize_city(city);
        if self.cities.contains_key(&normalized) {
            return false;
        }

        self.cities.insert(
            normalized,
            CityEntry {
                county: county.to_string(),
                county_fips: row.get(COUNTY_FIPS_COLUMN).trim().to_string(),
                region: region_for_county(self.regions, county),
            },
        );
        true
    }

    /// Read every row of a gazetteer CSV
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or a row cannot be read
    pub fn read_csv(&mut self, path: &Path) -> Result<usize> {
        let start = Instant::now();
        log_operation_start("Reading gazetteer", path);

        let mut rows = 0;
        for row in CsvRowReader::open(path)? {
            self.add_row(&row?);
            rows += 1;
        }

        log_operation_complete("read", path, rows, Some(start.elapsed()));
        Ok(rows)
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn county_count(&self) -> usize {
        self.counties.len()
    }

    /// Finish the lookup, stamped with the build date
    #[must_use]
    pub fn build(self, built_on: NaiveDate) -> GeoLookup {
        GeoLookup {
            cities: self.cities,
            counties: self.counties.into_iter().collect(),
            regions: RegionTable(self.regions),
            attribution: ATTRIBUTION,
            last_updated: built_on.format("%Y-%m-%d").to_string(),
        }
    }
}
