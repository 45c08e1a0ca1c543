//! Destinations for normalized records
//!
//! A [`RecordStore`] accepts a batch of records of one kind and
//! inserts-or-replaces them by identity. A call either succeeds for the whole
//! batch or fails for the whole batch; the loader's retry protocol relies on
//! nothing finer than that.

pub mod memory;
pub mod rest;

use crate::entity::Record;
use crate::error::Result;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Insert-or-replace sink for canonical records
pub trait RecordStore {
    /// Upsert a batch of records of one kind
    ///
    /// # Arguments
    /// * `records` - Records to upsert; all share `R::KIND`
    ///
    /// # Errors
    /// Returns an error if the store refused the batch or could not be
    /// reached. No record of a failed batch may be considered persisted.
    fn upsert<R: Record>(&mut self, records: &[R]) -> Result<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn upsert<R: Record>(&mut self, records: &[R]) -> Result<()> {
        (**self).upsert(records)
    }
}
