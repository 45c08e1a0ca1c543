//! Run-scoped identity deduplication

use rustc_hash::FxHashSet;

/// Identities already accepted for one entity kind in the current run
///
/// The first record with a given identity wins; the index is never
/// persisted and never shrinks.
#[derive(Debug, Clone, Default)]
pub struct DeduplicationIndex {
    seen: FxHashSet<String>,
}

impl DeduplicationIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identity
    ///
    /// # Returns
    /// `true` if this is the first time the identity was seen, `false` for a
    /// duplicate
    pub fn insert_first(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string())
    }

    /// Whether an identity has been accepted already
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let mut index = DeduplicationIndex::new();
        assert!(index.insert_first("00015234"));
        assert!(!index.insert_first("00015234"));
        assert!(index.insert_first("00015235"));
        assert_eq!(index.len(), 2);
        assert!(index.contains("00015234"));
    }

    #[test]
    fn identities_are_exact() {
        let mut index = DeduplicationIndex::new();
        assert!(index.is_empty());
        assert!(index.insert_first("15234"));
        assert!(index.insert_first("00015234"));
    }
}
