//! Campaign-finance disclosure loader
//!
//! Streams regulator CSV exports (filers, cover-sheet reports, itemized
//! contributions and expenditures), normalizes each row into a canonical
//! record, and upserts the records into a store in batches that degrade to
//! smaller chunks when the store refuses a batch. Also builds the static
//! city → county lookup used to match free-text city names.

pub mod config;
pub mod entity;
pub mod error;
pub mod fields;
pub mod filter;
pub mod geo;
pub mod importer;
pub mod loader;
pub mod reader;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{LoaderConfig, StoreConfig};
pub use entity::{Contribution, EntityKind, EntitySpec, Expenditure, Filer, Record, Rejection, Report};
pub use error::{LoaderError, Result};

// Pipeline
pub use filter::{DeduplicationIndex, ReceivedDateFilter};
pub use importer::{run_all, run_import};
pub use loader::{BatchLoader, LoadSummary, Pipeline};
pub use reader::{CsvRowReader, RawRow};
pub use store::{MemoryStore, RecordStore, RestStore};

// Geo lookup
pub use geo::{GeoLookup, GeoLookupBuilder, normalize_city};
