//! Utility functions for error handling
//!
//! File-system helpers that fail with path-carrying [`LoaderError`]s.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{LoaderError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(LoaderError::io(
            format!("File not found, needed for {purpose}"),
            io::Error::from(io::ErrorKind::NotFound),
        )
        .with_path(path));
    }

    if !path.is_file() {
        return Err(LoaderError::io(
            format!("Expected a file for {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        )
        .with_path(path));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
            _ => format!("Failed to open file for {purpose}"),
        };
        LoaderError::io(context, e).with_path(path)
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(LoaderError::io(
            format!("Directory not found, needed for {purpose}"),
            io::Error::from(io::ErrorKind::NotFound),
        )
        .with_path(path));
    }

    if !path.is_dir() {
        return Err(LoaderError::io(
            format!("Expected a directory for {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
        )
        .with_path(path));
    }

    fs::read_dir(path).map(|_| ()).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check directory permissions".to_string()
            }
            _ => format!("Failed to access directory for {purpose}"),
        };
        LoaderError::io(context, e).with_path(path)
    })
}

/// Safely create (or truncate) a file for writing, creating parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LoaderError::io(format!("Failed to create directory for {purpose}"), e)
                .with_path(parent)
        })?;
    }

    fs::File::create(path).map_err(|e| {
        LoaderError::io(format!("Failed to create file for {purpose}"), e).with_path(path)
    })
}
