//! PostgREST upsert client (Supabase)

use std::time::Duration;

use itertools::Itertools;
use reqwest::blocking::{Client, Request};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::RecordStore;
use crate::config::StoreConfig;
use crate::entity::Record;
use crate::error::{LoaderError, Result};

const REST_PATH: &str = "rest/v1";
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const USER_AGENT: &str = concat!("cf-loader/", env!("CARGO_PKG_VERSION"));

/// Store that upserts over the PostgREST HTTP API
///
/// Each batch is one `POST` with the records as a JSON array. Any non-2xx
/// status fails the batch and carries the response body.
#[derive(Debug)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// Create a client for the configured project
    ///
    /// # Errors
    /// Returns an error if the service key is not a valid header value or the
    /// HTTP client cannot be built
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let key = HeaderValue::from_str(&config.service_key)
            .map_err(|_| LoaderError::config("service key contains invalid characters"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|_| LoaderError::config("service key contains invalid characters"))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static(UPSERT_PREFERENCE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint receiving records of kind `R`
    #[must_use]
    pub fn endpoint<R: Record>(&self) -> String {
        format!("{}/{REST_PATH}/{}", self.base_url, R::KIND.table_name())
    }

    /// Build the upsert request for a batch without sending it
    pub fn build_request<R: Record>(&self, records: &[R]) -> Result<Request> {
        let columns = R::columns().iter().join(",");
        let request = self
            .client
            .post(self.endpoint::<R>())
            .query(&[("columns", columns)])
            .json(records)
            .build()?;
        Ok(request)
    }
}

impl RecordStore for RestStore {
    fn upsert<R: Record>(&mut self, records: &[R]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let request = self.build_request(records)?;
        log::debug!("POST {} ({} records)", request.url().path(), records.len());

        let response = self.client.execute(request)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(LoaderError::store(format!(
            "{} upsert returned {status}: {}",
            R::KIND.table_name(),
            body.trim()
        )))
    }
}
