//! Canonical city names

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static FORT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^FT\.?\s+").expect("fort pattern is valid"));
static SAINT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ST\.?\s+").expect("saint pattern is valid"));
static STATE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),?\s*(TX|TEXAS)$").expect("state pattern is valid"));
static COUNTRY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+TX\s+USA$").expect("country pattern is valid"));

/// Normalize a free-text city name for matching
///
/// Steps, in order: uppercase and trim; collapse whitespace runs to one
/// space; `FT`/`FT.` prefix to `FORT `; `ST`/`ST.` prefix to `SAINT `; drop
/// a trailing `TX`/`TEXAS` (optionally comma-separated); drop a trailing
/// `TX USA`; trim again. An empty input gives an empty output.
#[must_use]
pub fn normalize_city(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let upper = raw.to_uppercase();
    let name = WHITESPACE_RUN.replace_all(upper.trim(), " ");
    let name = FORT_PREFIX.replace(&name, "FORT ");
    let name = SAINT_PREFIX.replace(&name, "SAINT ");
    let name = STATE_SUFFIX.replace(&name, "");
    let name = COUNTRY_SUFFIX.replace(&name, "");
    name.trim().to_string()
}
