//! Money amount parsing.
//!
//! Amount columns carry optional `$` and thousands-separator decoration.
//! Unparsable values never fail: the two variants differ only in what they
//! fall back to.

/// Parse an amount, falling back to `0.0`
///
/// Used for itemized contributions and expenditures, whose amount always
/// carries a value.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    parse_optional_amount(raw).unwrap_or(0.0)
}

/// Parse an amount, falling back to `None`
///
/// Used for report aggregate totals, where a missing total must stay
/// distinguishable from a true zero.
#[must_use]
pub fn parse_optional_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ',' | '$')).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoration_is_ignored() {
        assert_eq!(parse_amount("$1,234.50"), 1234.50);
        assert_eq!(parse_amount("1234.50"), 1234.50);
        assert_eq!(parse_amount(" $ 1,000 "), 1000.0);
        assert_eq!(parse_amount("-$25.00"), -25.0);
    }

    #[test]
    fn defaults_differ_by_variant() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
        assert_eq!(parse_amount("$"), 0.0);

        assert_eq!(parse_optional_amount(""), None);
        assert_eq!(parse_optional_amount("n/a"), None);
        assert_eq!(parse_optional_amount("0.00"), Some(0.0));
    }

    #[test]
    fn non_finite_values_are_unparsable() {
        assert_eq!(parse_optional_amount("inf"), None);
        assert_eq!(parse_optional_amount("NaN"), None);
        assert_eq!(parse_amount("infinity"), 0.0);
    }
}
