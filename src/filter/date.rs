//! Received-date cutoff
//!
//! The comparison is a plain integer comparison on the leading `YYYYMMDD`
//! digits of the raw value, not a calendar comparison. Values that cannot be
//! read as digits fail open.

/// Records received before this `YYYYMMDD` value are excluded
pub const DEFAULT_MIN_RECEIVED_DATE: i64 = 20_200_101;

/// Number of leading characters read as the comparable date
const DATE_PREFIX_LEN: usize = 8;

/// Inclusion policy on a record's raw received-date column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedDateFilter {
    cutoff: i64,
}

impl Default for ReceivedDateFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RECEIVED_DATE)
    }
}

impl ReceivedDateFilter {
    /// Create a filter with a `YYYYMMDD` cutoff
    #[must_use]
    pub fn new(cutoff: i64) -> Self {
        Self { cutoff }
    }

    /// The cutoff this filter compares against
    #[must_use]
    pub fn cutoff(&self) -> i64 {
        self.cutoff
    }

    /// Whether a record with this raw received date is kept
    ///
    /// # Arguments
    /// * `raw` - Received-date column exactly as read from the source
    ///
    /// # Returns
    /// - `true` for a blank value (a missing date never excludes)
    /// - `false` for a non-blank value shorter than eight characters, which
    ///   reads as zero
    /// - `true` when the first eight characters are not an integer
    /// - otherwise whether that integer is at least the cutoff
    #[must_use]
    pub fn admits(&self, raw: &str) -> bool {
        if raw.trim().is_empty() {
            return true;
        }

        let value = match raw.char_indices().nth(DATE_PREFIX_LEN) {
            Some((end, _)) => raw[..end].trim().parse::<i64>(),
            None if raw.chars().count() == DATE_PREFIX_LEN => raw.trim().parse::<i64>(),
            None => Ok(0),
        };

        match value {
            Ok(value) => value >= self.cutoff,
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let filter = ReceivedDateFilter::default();
        assert!(filter.admits("20200101"));
        assert!(!filter.admits("20191231"));
        assert!(filter.admits("20240615"));
    }

    #[test]
    fn missing_date_passes() {
        let filter = ReceivedDateFilter::default();
        assert!(filter.admits(""));
        assert!(filter.admits("   "));
    }

    #[test]
    fn only_leading_digits_are_compared() {
        let filter = ReceivedDateFilter::default();
        assert!(filter.admits("20200101123000"));
        assert!(!filter.admits("19990101 00:00"));
    }

    #[test]
    fn unparsable_prefix_fails_open() {
        let filter = ReceivedDateFilter::default();
        assert!(filter.admits("2020-01-01"));
        assert!(filter.admits("not a date"));
    }

    #[test]
    fn short_values_read_as_zero() {
        let filter = ReceivedDateFilter::default();
        assert!(!filter.admits("2024"));
        assert!(!filter.admits("abc"));
    }

    #[test]
    fn custom_cutoff() {
        let filter = ReceivedDateFilter::new(20230101);
        assert_eq!(filter.cutoff(), 20230101);
        assert!(!filter.admits("20221231"));
        assert!(filter.admits("20230101"));
    }
}
