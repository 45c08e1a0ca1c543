//! Field parsers
//!
//! Pure conversions from raw source strings to typed values. None of these
//! fail: an unusable value degrades to a documented default.

pub mod date_utils;
pub mod money;
pub mod names;

pub use date_utils::parse_date;
pub use money::{parse_amount, parse_optional_amount};
pub use names::{NameColumns, NameParts, UNKNOWN_NAME, assemble_name};

/// Map a blank value to `None`, keeping non-blank values unchanged
#[must_use]
pub fn optional_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
