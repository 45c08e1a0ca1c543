//! Date parsing for disclosure date columns.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Formats tried, in order, when a value is not a bare 8-digit date
pub const DATE_FORMATS: [&str; 3] = ["%Y%m%d", "%m/%d/%Y", "%Y-%m-%d"];

/// Shapes a value must match before the format of the same index is tried.
/// Years are exactly four digits; no sign or padding is allowed.
const DATE_SHAPES: [&str; 3] = [
    r"^[0-9]{8}$",
    r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$",
    r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$",
];

static SHAPED_FORMATS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    DATE_SHAPES
        .iter()
        .zip(DATE_FORMATS)
        .map(|(shape, format)| (Regex::new(shape).expect("date shape is valid"), format))
        .collect()
});

/// Canonical output format
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Shortest raw value that can hold a date
const MIN_DATE_LEN: usize = 8;

/// Longest prefix handed to the format parsers
const MAX_DATE_LEN: usize = 10;

/// Parse a raw date column into `YYYY-MM-DD`
///
/// A bare `YYYYMMDD` value is regrouped digit for digit. Anything else is
/// tried against [`DATE_FORMATS`] using at most its first ten characters.
/// Empty, short, and unrecognized values all yield `None`.
#[must_use]
pub fn parse_date(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.chars().count() < MIN_DATE_LEN {
        return None;
    }

    if raw.len() == MIN_DATE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..8]));
    }

    let head = char_prefix(raw, MAX_DATE_LEN);
    parse_date_string(head).map(|date| date.format(CANONICAL_FORMAT).to_string())
}

/// Parse a date string with multiple format attempts
///
/// A format is only tried when the whole string has its shape, so chrono
/// never skips whitespace, accepts a sign, or reads a short year.
#[must_use]
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    SHAPED_FORMATS
        .iter()
        .filter(|(shape, _)| shape.is_match(s))
        .find_map(|(_, format)| NaiveDate::parse_from_str(s, format).ok())
}

/// The first `n` characters of `s`, never splitting a code point
fn char_prefix(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(idx, _)| &s[..idx])
}
