//! City-name normalization and the static city lookup table
//!
//! [`normalize_city`] is the one canonical form of a place name. The lookup
//! file is keyed by it, so any consumer matching free-text cities against
//! the file must use exactly the same function.

pub mod lookup;
pub mod normalize;

pub use lookup::{CityEntry, GeoLookup, GeoLookupBuilder, TEXAS_REGIONS, region_for_county};
pub use normalize::normalize_city;
