//! Configuration for the loader.

use std::path::PathBuf;

use crate::error::{LoaderError, Result};
use crate::filter::date::DEFAULT_MIN_RECEIVED_DATE;

/// Environment variable holding the store base URL
pub const STORE_URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the service key used for writes
pub const STORE_KEY_VAR: &str = "SUPABASE_SERVICE_KEY";

/// Configuration for an import run
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory holding the source CSV files
    pub data_dir: PathBuf,
    /// Override for the per-kind batch size
    pub batch_size: Option<usize>,
    /// Override for the per-kind fallback sub-batch size
    pub fallback_batch_size: Option<usize>,
    /// Received-date cutoff as a `YYYYMMDD` integer
    pub min_received_date: i64,
    /// Load into an in-memory store instead of the remote one
    pub dry_run: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            batch_size: None,
            fallback_batch_size: None,
            min_received_date: DEFAULT_MIN_RECEIVED_DATE,
            dry_run: false,
        }
    }
}

impl LoaderConfig {
    /// Reject sizes that would make the batching protocol meaningless
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == Some(0) {
            return Err(LoaderError::config("batch size must be at least 1"));
        }
        if self.fallback_batch_size == Some(0) {
            return Err(LoaderError::config("fallback batch size must be at least 1"));
        }
        if !(10_000_000..=99_999_999).contains(&self.min_received_date) {
            return Err(LoaderError::config(format!(
                "minimum received date {} is not a YYYYMMDD value",
                self.min_received_date
            )));
        }
        Ok(())
    }
}

/// Credentials and location of the remote store
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the project, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Service key sent as both `apikey` and bearer token
    pub service_key: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    /// Load from the process environment
    ///
    /// A `.env` file is read by the binary at startup, before this runs.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup, failing fast on missing values
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| LoaderError::config(format!("{name} is not set")))
        };

        let url = read(STORE_URL_VAR)?;
        let service_key = read(STORE_KEY_VAR)?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(LoaderError::config(format!(
                "{STORE_URL_VAR} must be an http(s) URL, got {url}"
            )));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            service_key,
        })
    }
}
