//! Row filters applied between normalization and batching
//!
//! - [`date::ReceivedDateFilter`]: the received-date inclusion cutoff
//! - [`dedup::DeduplicationIndex`]: run-scoped first-wins identity set

pub mod date;
pub mod dedup;

pub use date::{DEFAULT_MIN_RECEIVED_DATE, ReceivedDateFilter};
pub use dedup::DeduplicationIndex;
