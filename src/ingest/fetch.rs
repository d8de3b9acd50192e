//! Memoizing HTTP fetcher.
//!
//! `Fetcher::fetch` performs one GET per URL and collapses every failure
//! (transport error, non-200 status, undecodable body) into `None`. Results,
//! absent ones included, go into the cache so repeated lookups of the same
//! URL never hit the network again while the entry is live.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::ingest::cache::{CacheStore, MemoryStore};
use crate::logging::{self, DataSource};
use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Raw response as seen by the fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The network seam. Production uses `ReqwestTransport`; tests plug in a
/// canned implementation.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Blocking `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("pegmon_dashboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::from_client(builder.build()?))
    }

    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::TransportError(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

pub struct Fetcher<T: Transport, S: CacheStore = MemoryStore> {
    transport: T,
    cache: S,
}

impl<T: Transport> Fetcher<T, MemoryStore> {
    /// Fetcher with the default bounded in-memory cache.
    pub fn new(transport: T) -> Self {
        Self::with_cache(transport, MemoryStore::default())
    }
}

impl<T: Transport, S: CacheStore> Fetcher<T, S> {
    pub fn with_cache(transport: T, cache: S) -> Self {
        Self { transport, cache }
    }

    /// GET `url` and decode it as JSON, or `None` on any failure.
    pub fn fetch(&mut self, url: &str) -> Option<Value> {
        self.fetch_at(url, Utc::now())
    }

    /// Same as `fetch` with an explicit clock for cache expiry.
    pub fn fetch_at(&mut self, url: &str, now: DateTime<Utc>) -> Option<Value> {
        if let Some(hit) = self.cache.get(url, now) {
            logging::debug(DataSource::Cache, None, &format!("hit {}", url));
            return hit;
        }

        let result = match self.request(url) {
            Ok(json) => Some(json),
            Err(e) => {
                logging::log_fetch_failure(None, &format!("GET {}", url), &e);
                None
            }
        };

        self.cache.put(url.to_string(), result.clone(), now);
        result
    }

    fn request(&self, url: &str) -> Result<Value, FetchError> {
        logging::debug(DataSource::Pegelonline, None, &format!("GET {}", url));
        let response = self.transport.get(url)?;

        if response.status != 200 {
            return Err(FetchError::HttpError(response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &S {
        &self.cache
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
