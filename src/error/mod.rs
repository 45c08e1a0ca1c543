//! Error handling for the loader.
//!
//! Only boundary failures are errors here: files that cannot be opened or
//! read, missing store credentials, transport failures. Rows that fail a
//! derivation rule are rejections (see [`crate::entity::Rejection`]) and
//! unparsable field values degrade to defaults; neither surfaces as a
//! `LoaderError`.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

/// Specialized error type for the loader
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// Error opening or reading a file
    #[error("IO error: {context}{}: {source}", display_path(.path.as_deref()))]
    Io {
        context: String,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Error decoding a delimited source file
    #[error("CSV error{}: {source}", display_path(.path.as_deref()))]
    Csv {
        path: Option<PathBuf>,
        #[source]
        source: csv::Error,
    },

    /// Missing or invalid configuration, raised before any file is opened
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store refused a request or could not be reached
    #[error("Store error: {0}")]
    Store(String),

    /// Error encoding records or the lookup table as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl LoaderError {
    /// Create an IO error with a context message
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            path: None,
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Attach a path to an IO or CSV error; other variants are returned unchanged
    #[must_use]
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        let path = Some(path.as_ref().to_path_buf());
        match self {
            Self::Io {
                context, source, ..
            } => Self::Io {
                context,
                path,
                source,
            },
            Self::Csv { source, .. } => Self::Csv { path, source },
            other => other,
        }
    }
}

impl From<io::Error> for LoaderError {
    fn from(error: io::Error) -> Self {
        Self::io("IO operation failed", error)
    }
}

impl From<csv::Error> for LoaderError {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            path: None,
            source: error,
        }
    }
}

impl From<reqwest::Error> for LoaderError {
    fn from(error: reqwest::Error) -> Self {
        Self::Store(error.to_string())
    }
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;
