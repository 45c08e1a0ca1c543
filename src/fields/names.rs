//! Display-name assembly from organization and person-name columns.

use crate::reader::RawRow;

/// Fallback for contributors and payees with no usable name columns
pub const UNKNOWN_NAME: &str = "Unknown";

/// The raw name parts of one party on a row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameParts<'a> {
    pub organization: &'a str,
    pub last: &'a str,
    pub first: &'a str,
    pub suffix: &'a str,
}

/// Source column names for one party's name parts
#[derive(Debug, Clone, Copy)]
pub struct NameColumns {
    pub organization: &'static str,
    pub last: &'static str,
    pub first: &'static str,
    pub suffix: &'static str,
}

impl NameColumns {
    /// Borrow this party's name parts from a row
    #[must_use]
    pub fn read<'a>(&self, row: &'a RawRow) -> NameParts<'a> {
        NameParts {
            organization: row.get(self.organization),
            last: row.get(self.last),
            first: row.get(self.first),
            suffix: row.get(self.suffix),
        }
    }
}

/// Assemble a display name
///
/// A non-empty organization name wins outright. Otherwise the result is
/// `"{last}, {first}"`, with `" {suffix}"` appended when a suffix is present,
/// or whichever single part exists. With nothing to go on, `fallback` is
/// returned.
#[must_use]
pub fn assemble_name(parts: &NameParts<'_>, fallback: &str) -> String {
    let organization = parts.organization.trim();
    if !organization.is_empty() {
        return organization.to_string();
    }

    let last = parts.last.trim();
    let first = parts.first.trim();
    let suffix = parts.suffix.trim();

    match (last.is_empty(), first.is_empty()) {
        (false, false) if suffix.is_empty() => format!("{last}, {first}"),
        (false, false) => format!("{last}, {first} {suffix}"),
        (false, true) => last.to_string(),
        (true, false) => first.to_string(),
        (true, true) => fallback.to_string(),
    }
}
