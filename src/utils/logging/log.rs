//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::fmt::Display;
use std::path::Path;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} items from {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} items from {}",
            operation,
            items,
            path.display()
        );
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log a row that did not become a record
///
/// Rejections are routine, so these go to `debug` rather than `warn`.
///
/// # Arguments
/// * `kind` - Entity kind being loaded
/// * `line` - Source line of the row, 0 when unknown
/// * `reason` - Why the row was rejected
pub fn log_rejection(kind: impl Display, line: u64, reason: impl Display) {
    if line > 0 {
        log::debug!("Skipping {kind} row at line {line}: {reason}");
    } else {
        log::debug!("Skipping {kind} row: {reason}");
    }
}

/// Log a batch the store refused
///
/// # Arguments
/// * `kind` - Entity kind being loaded
/// * `size` - Number of records in the batch
/// * `retrying` - Whether the batch will be retried in smaller chunks
/// * `error` - The store's error
pub fn log_batch_failure(kind: impl Display, size: usize, retrying: bool, error: impl Display) {
    if retrying {
        log::warn!("Upsert of {size} {kind} records failed, retrying in smaller chunks: {error}");
    } else {
        log::error!("Dropping {size} {kind} records after failed upsert: {error}");
    }
}
