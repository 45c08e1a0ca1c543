//! Entity kinds and their normalization specs
//!
//! Each disclosure file kind is described by an [`EntitySpec`]: which column
//! carries the identity, which carries the received date, whether identities
//! are deduplicated within a run, the batch sizes used when persisting, and
//! the derivation that turns a raw row into a canonical record. One generic
//! engine ([`crate::loader::BatchLoader`]) consumes any of them.
//!
//! Available kinds:
//! - Filer: candidate and committee registrations (`cand.csv`)
//! - Report: cover sheets with period totals (`cover.csv`)
//! - Contribution: itemized money in (`contribs_*.csv`)
//! - Expenditure: itemized money out (`expend_*.csv`)

pub mod contribution;
pub mod expenditure;
pub mod filer;
pub mod report;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::LoaderError;
use crate::filter::date::ReceivedDateFilter;
use crate::reader::{RawRow, SourcePattern};

pub use contribution::Contribution;
pub use expenditure::Expenditure;
pub use filer::Filer;
pub use macros::Record;
pub use report::Report;

/// The four disclosure record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Filer,
    Report,
    Contribution,
    Expenditure,
}

impl EntityKind {
    /// All kinds, in the order a full import runs them
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Filer,
        EntityKind::Report,
        EntityKind::Contribution,
        EntityKind::Expenditure,
    ];

    /// Short lowercase name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Filer => "filer",
            Self::Report => "report",
            Self::Contribution => "contribution",
            Self::Expenditure => "expenditure",
        }
    }

    /// Store table receiving this kind
    #[must_use]
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Filer => "filers",
            Self::Report => "reports",
            Self::Contribution => "contributions",
            Self::Expenditure => "expenditures",
        }
    }

    /// Naming convention of this kind's source files
    #[must_use]
    pub fn source_pattern(self) -> SourcePattern {
        match self {
            Self::Filer => SourcePattern::Single("cand.csv"),
            Self::Report => SourcePattern::Single("cover.csv"),
            Self::Contribution => SourcePattern::Sharded {
                prefix: "contribs_",
                extension: "csv",
            },
            Self::Expenditure => SourcePattern::Sharded {
                prefix: "expend_",
                extension: "csv",
            },
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filer" | "filers" | "cand" => Ok(Self::Filer),
            "report" | "reports" | "cover" => Ok(Self::Report),
            "contribution" | "contributions" | "contribs" => Ok(Self::Contribution),
            "expenditure" | "expenditures" | "expend" => Ok(Self::Expenditure),
            other => Err(LoaderError::config(format!("Unknown entity kind: {other}"))),
        }
    }
}

/// A canonical record the store can upsert
///
/// Implemented with `#[derive(Record)]`.
pub trait Record: Serialize {
    /// Kind of this record
    const KIND: EntityKind;

    /// Identity used as primary key and deduplication key
    fn record_id(&self) -> &str;

    /// Store column names, in serialization order
    fn columns() -> &'static [&'static str];
}

/// Why a row did not become a record
///
/// Rejections are expected outcomes, counted in the load summary, never
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The identity column was empty or absent
    MissingIdentity,
    /// The received date falls before the cutoff
    BeforeCutoff,
    /// A required field was empty after derivation
    MissingField(&'static str),
    /// The identity was already accepted earlier in this run
    Duplicate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentity => f.write_str("missing identity"),
            Self::BeforeCutoff => f.write_str("received before cutoff"),
            Self::MissingField(field) => write!(f, "missing required field {field}"),
            Self::Duplicate => f.write_str("duplicate identity"),
        }
    }
}

/// Derivation from a raw row to a record, run after the shared checks
pub type DeriveFn<R> = fn(&RawRow) -> Result<R, Rejection>;

/// Everything the generic engine needs to know about one entity kind
pub struct EntitySpec<R> {
    /// Source column holding the identity
    pub identity_column: &'static str,
    /// Source column holding the received date, for kinds filtered by it
    pub received_date_column: Option<&'static str>,
    /// Source columns that must be non-blank: `(column, field name)`
    pub required_columns: &'static [(&'static str, &'static str)],
    /// Enforce first-wins identity uniqueness within a run
    pub deduplicate: bool,
    /// Records per upsert call
    pub batch_size: usize,
    /// Records per retry call after a full batch fails
    pub fallback_batch_size: usize,
    /// Kind-specific derivation
    pub derive: DeriveFn<R>,
}

impl<R> Clone for EntitySpec<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for EntitySpec<R> {}

impl<R> fmt::Debug for EntitySpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySpec")
            .field("identity_column", &self.identity_column)
            .field("received_date_column", &self.received_date_column)
            .field("required_columns", &self.required_columns)
            .field("deduplicate", &self.deduplicate)
            .field("batch_size", &self.batch_size)
            .field("fallback_batch_size", &self.fallback_batch_size)
            .finish_non_exhaustive()
    }
}

impl<R: Record> EntitySpec<R> {
    /// Kind described by this spec
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        R::KIND
    }

    /// Turn a raw row into a record or a rejection
    ///
    /// Checks run in a fixed order: identity, received-date cutoff, required
    /// columns, then the kind's own derivation.
    pub fn normalize(&self, row: &RawRow, received: &ReceivedDateFilter) -> Result<R, Rejection> {
        if row.get(self.identity_column).trim().is_empty() {
            return Err(Rejection::MissingIdentity);
        }

        if let Some(column) = self.received_date_column {
            if !received.admits(row.get(column)) {
                return Err(Rejection::BeforeCutoff);
            }
        }

        if let Some((_, field)) = self
            .required_columns
            .iter()
            .find(|(column, _)| row.get(column).trim().is_empty())
        {
            return Err(Rejection::MissingField(*field));
        }

        (self.derive)(row)
    }
}
