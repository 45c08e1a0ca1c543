//! In-memory store for dry runs and tests

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use super::RecordStore;
use crate::entity::{EntityKind, Record};
use crate::error::{LoaderError, Result};

/// One upsert call as seen by a [`MemoryStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertCall {
    pub kind: EntityKind,
    pub size: usize,
    pub accepted: bool,
}

/// Store keeping the latest serialized record per identity per table
///
/// It can be told to refuse batches above a size, or any batch containing
/// certain identities, to exercise the retry protocol.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: BTreeMap<&'static str, BTreeMap<String, serde_json::Value>>,
    max_batch: Option<usize>,
    refused_ids: FxHashSet<String>,
    calls: Vec<UpsertCall>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every batch holding more than `max` records
    #[must_use]
    pub fn refusing_batches_over(mut self, max: usize) -> Self {
        self.max_batch = Some(max);
        self
    }

    /// Refuse every batch containing any of these identities
    #[must_use]
    pub fn refusing_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.refused_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Stored records of a kind, keyed by identity
    #[must_use]
    pub fn table(&self, kind: EntityKind) -> Option<&BTreeMap<String, serde_json::Value>> {
        self.tables.get(kind.table_name())
    }

    /// Number of stored records of a kind
    #[must_use]
    pub fn len(&self, kind: EntityKind) -> usize {
        self.table(kind).map_or(0, BTreeMap::len)
    }

    /// Stored record of a kind by identity
    #[must_use]
    pub fn get(&self, kind: EntityKind, id: &str) -> Option<&serde_json::Value> {
        self.table(kind).and_then(|table| table.get(id))
    }

    /// Every upsert call received, in order
    #[must_use]
    pub fn calls(&self) -> &[UpsertCall] {
        &self.calls
    }

    fn refusal<R: Record>(&self, records: &[R]) -> Option<String> {
        if let Some(max) = self.max_batch.filter(|max| records.len() > *max) {
            return Some(format!("batch of {} exceeds limit {max}", records.len()));
        }
        records
            .iter()
            .find(|record| self.refused_ids.contains(record.record_id()))
            .map(|record| format!("record {} refused", record.record_id()))
    }
}

impl RecordStore for MemoryStore {
    fn upsert<R: Record>(&mut self, records: &[R]) -> Result<()> {
        let refusal = self.refusal(records);
        self.calls.push(UpsertCall {
            kind: R::KIND,
            size: records.len(),
            accepted: refusal.is_none(),
        });
        if let Some(reason) = refusal {
            return Err(LoaderError::store(reason));
        }

        // Serialize everything before touching the table so a failure leaves it unchanged
        let rows = records
            .iter()
            .map(|record| Ok((record.record_id().to_string(), serde_json::to_value(record)?)))
            .collect::<Result<Vec<_>>>()?;

        self.tables
            .entry(R::KIND.table_name())
            .or_default()
            .extend(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Filer;

    fn filer(id: &str, name: &str) -> Filer {
        Filer {
            id: id.to_string(),
            name: name.to_string(),
            r#type: None,
            party: None,
            office_held: None,
            office_district: None,
            office_county: None,
            status: None,
            city: None,
            state: None,
        }
    }

    #[test]
    fn upsert_replaces_by_identity() {
        let mut store = MemoryStore::new();
        store.upsert(&[filer("1", "First"), filer("2", "Second")]).unwrap();
        store.upsert(&[filer("1", "Replaced")]).unwrap();

        assert_eq!(store.len(EntityKind::Filer), 2);
        assert_eq!(store.get(EntityKind::Filer, "1").unwrap()["name"], "Replaced");
        assert_eq!(store.calls().len(), 2);
    }

    #[test]
    fn oversized_batches_are_refused_whole() {
        let mut store = MemoryStore::new().refusing_batches_over(1);
        assert!(store.upsert(&[filer("1", "A"), filer("2", "B")]).is_err());
        assert_eq!(store.len(EntityKind::Filer), 0);
        assert!(!store.calls()[0].accepted);
    }

    #[test]
    fn refused_ids_fail_their_batch() {
        let mut store = MemoryStore::new().refusing_ids(["bad"]);
        assert!(store.upsert(&[filer("ok", "A"), filer("bad", "B")]).is_err());
        store.upsert(&[filer("ok", "A")]).unwrap();
        assert_eq!(store.len(EntityKind::Filer), 1);
        assert!(store.table(EntityKind::Report).is_none());
    }
}
