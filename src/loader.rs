//! Batch loading with degrading retry
//!
//! Rows stream through a [`Pipeline`] (normalization, received-date cutoff,
//! optional deduplication) and accepted records are buffered. A full buffer,
//! or the non-empty remainder at end of input, is flushed with one upsert. If
//! the store refuses it, the same records are retried in fixed-size chunks of
//! the fallback size; a chunk that fails again is logged and dropped without
//! further subdivision, and the load carries on.

use std::fmt;
use std::ops::AddAssign;

use indicatif::ProgressBar;

use crate::entity::{EntitySpec, Record, Rejection};
use crate::error::Result;
use crate::filter::{DeduplicationIndex, ReceivedDateFilter};
use crate::reader::RawRow;
use crate::store::RecordStore;
use crate::utils::logging::{hidden_spinner, log_batch_failure, log_rejection};

/// Counters for one load, or several merged together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub missing_identity: usize,
    pub missing_field: usize,
    pub before_cutoff: usize,
    pub duplicate: usize,
    pub persisted: usize,
    pub dropped: usize,
    pub failed_batches: usize,
    pub upsert_calls: usize,
}

impl LoadSummary {
    /// Count a rejected row under its reason
    pub fn record_rejection(&mut self, rejection: Rejection) {
        self.rejected += 1;
        match rejection {
            Rejection::MissingIdentity => self.missing_identity += 1,
            Rejection::MissingField(_) => self.missing_field += 1,
            Rejection::BeforeCutoff => self.before_cutoff += 1,
            Rejection::Duplicate => self.duplicate += 1,
        }
    }

    /// Fold another summary into this one
    pub fn merge(&mut self, other: &LoadSummary) {
        *self += *other;
    }
}

impl AddAssign for LoadSummary {
    fn add_assign(&mut self, other: Self) {
        self.rows_read += other.rows_read;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.missing_identity += other.missing_identity;
        self.missing_field += other.missing_field;
        self.before_cutoff += other.before_cutoff;
        self.duplicate += other.duplicate;
        self.persisted += other.persisted;
        self.dropped += other.dropped;
        self.failed_batches += other.failed_batches;
        self.upsert_calls += other.upsert_calls;
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read, {} accepted, {} rejected \
             ({} missing identity, {} missing field, {} before cutoff, {} duplicate), \
             {} persisted, {} dropped in {} failed batches, {} upsert calls",
            self.rows_read,
            self.accepted,
            self.rejected,
            self.missing_identity,
            self.missing_field,
            self.before_cutoff,
            self.duplicate,
            self.persisted,
            self.dropped,
            self.failed_batches,
            self.upsert_calls
        )
    }
}

/// Run-scoped normalization state for one entity kind
///
/// Keep one pipeline across every source file of a kind so deduplication
/// spans the whole run.
#[derive(Debug)]
pub struct Pipeline<R> {
    spec: EntitySpec<R>,
    received: ReceivedDateFilter,
    index: Option<DeduplicationIndex>,
}

impl<R: Record> Pipeline<R> {
    /// Create a pipeline; a dedup index is kept only if the entity spec enables it
    #[must_use]
    pub fn new(spec: EntitySpec<R>, received: ReceivedDateFilter) -> Self {
        Self {
            spec,
            received,
            index: spec.deduplicate.then(DeduplicationIndex::new),
        }
    }

    /// Identities accepted so far, when deduplicating
    #[must_use]
    pub fn index(&self) -> Option<&DeduplicationIndex> {
        self.index.as_ref()
    }

    /// Normalize a row and apply the dedup index
    ///
    /// Only rows that survive normalization claim their identity, so a
    /// rejected row never shadows a later valid one.
    pub fn process(&mut self, row: &RawRow) -> std::result::Result<R, Rejection> {
        let record = self.spec.normalize(row, &self.received)?;
        if let Some(index) = self.index.as_mut() {
            if !index.insert_first(record.record_id()) {
                return Err(Rejection::Duplicate);
            }
        }
        Ok(record)
    }
}

/// Drives rows into a store in batches
pub struct BatchLoader<S> {
    store: S,
    batch_size: usize,
    fallback_batch_size: usize,
    progress: ProgressBar,
}

impl<S: RecordStore> BatchLoader<S> {
    /// Create a loader
    ///
    /// # Arguments
    /// * `store` - Destination of accepted records
    /// * `batch_size` - Records per upsert; zero is treated as one
    /// * `fallback_batch_size` - Records per retry chunk; zero is treated as one
    pub fn new(store: S, batch_size: usize, fallback_batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
            fallback_batch_size: fallback_batch_size.max(1),
            progress: hidden_spinner(),
        }
    }

    /// Report each row read on this progress bar from now on
    pub fn set_progress(&mut self, progress: ProgressBar) {
        self.progress = progress;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load a stream of rows
    ///
    /// # Arguments
    /// * `pipeline` - Normalization state, shared across calls for one kind
    /// * `rows` - Rows from a source; the first read error aborts the load
    ///
    /// # Returns
    /// Counters for this call only
    ///
    /// # Errors
    /// Returns the first row-read error. Store failures are never returned;
    /// they are retried, logged and counted.
    pub fn load<R, I>(&mut self, pipeline: &mut Pipeline<R>, rows: I) -> Result<LoadSummary>
    where
        R: Record,
        I: IntoIterator<Item = Result<RawRow>>,
    {
        let mut summary = LoadSummary::default();
        let mut buffer: Vec<R> = Vec::with_capacity(self.batch_size);

        for row in rows {
            let row = row?;
            summary.rows_read += 1;
            self.progress.inc(1);

            match pipeline.process(&row) {
                Ok(record) => {
                    summary.accepted += 1;
                    buffer.push(record);
                    if buffer.len() >= self.batch_size {
                        self.flush(&mut buffer, &mut summary);
                    }
                }
                Err(rejection) => {
                    log_rejection(R::KIND, row.line(), rejection);
                    summary.record_rejection(rejection);
                }
            }
        }

        if !buffer.is_empty() {
            self.flush(&mut buffer, &mut summary);
        }

        Ok(summary)
    }

    fn flush<R: Record>(&mut self, buffer: &mut Vec<R>, summary: &mut LoadSummary) {
        summary.upsert_calls += 1;
        match self.store.upsert(buffer.as_slice()) {
            Ok(()) => summary.persisted += buffer.len(),
            Err(e) => {
                log_batch_failure(R::KIND, buffer.len(), true, &e);
                for chunk in buffer.chunks(self.fallback_batch_size) {
                    summary.upsert_calls += 1;
                    match self.store.upsert(chunk) {
                        Ok(()) => summary.persisted += chunk.len(),
                        Err(e) => {
                            log_batch_failure(R::KIND, chunk.len(), false, &e);
                            summary.failed_batches += 1;
                            summary.dropped += chunk.len();
                        }
                    }
                }
            }
        }
        buffer.clear();
    }
}
