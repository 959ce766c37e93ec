//! Catalog cache - one upstream fetch per process, served from memory afterwards
//!
//! The first successful [`CatalogCache::get_catalog`] call populates the cache.
//! Concurrent first callers share a single in-flight fetch and all receive its
//! outcome, success or failure. A failed fetch leaves the cache empty so the
//! next call fetches again.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use http::StatusCode;
use shared::models::Catalog;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};

/// Number of products requested from the product source
pub const FETCH_LIMIT: u32 = 200;

/// Product source failure
///
/// Cloneable so every caller sharing a failed fetch gets the same error.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Transport failure or timeout
    #[error("product source request failed: {0}")]
    Request(#[source] Arc<reqwest::Error>),
    /// Non-success HTTP status
    #[error("product source returned {0}")]
    Status(StatusCode),
    /// Body is not a catalog
    #[error("product source returned an invalid catalog: {0}")]
    Decode(#[source] Arc<serde_json::Error>),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(Arc::new(e))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(Arc::new(e))
    }
}

type FetchResult = Result<Arc<Catalog>, CatalogError>;
type InflightFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Upstream product list
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch(&self, limit: u32) -> Result<Catalog, CatalogError>;
}

/// Product source reached over HTTP (`GET <base_url>?limit=N`)
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch(&self, limit: u32) -> Result<Catalog, CatalogError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// In-process catalog cache, written once and read many
pub struct CatalogCache {
    source: Arc<dyn ProductSource>,
    cell: OnceCell<Arc<Catalog>>,
    inflight: Mutex<Option<InflightFetch>>,
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("loaded", &self.is_loaded())
            .field("products", &self.cell.get().map(|c| c.len()))
            .finish()
    }
}

impl CatalogCache {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
            inflight: Mutex::new(None),
        }
    }

    /// Return the cached catalog, fetching it on first use
    pub async fn get_catalog(&self) -> FetchResult {
        if let Some(catalog) = self.cell.get() {
            return Ok(Arc::clone(catalog));
        }

        let fetch = {
            let mut inflight = self.inflight.lock().await;
            // Committed while waiting for the lock
            if let Some(catalog) = self.cell.get() {
                return Ok(Arc::clone(catalog));
            }
            inflight
                .get_or_insert_with(|| self.start_fetch())
                .clone()
        };

        let result = fetch.clone().await;

        let mut inflight = self.inflight.lock().await;
        if let Ok(catalog) = &result {
            if self.cell.set(Arc::clone(catalog)).is_ok() {
                tracing::info!(
                    products = catalog.len(),
                    total = catalog.total,
                    "Cached products for retrieval"
                );
            }
        }
        // Only the fetch this call joined is retired; a newer one stays
        if inflight.as_ref().is_some_and(|f| f.ptr_eq(&fetch)) {
            *inflight = None;
        }

        result
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    fn start_fetch(&self) -> InflightFetch {
        let source = Arc::clone(&self.source);
        async move {
            let catalog = source.fetch(FETCH_LIMIT).await;
            if let Err(e) = &catalog {
                tracing::warn!(error = %e, "Catalog fetch failed");
            }
            catalog.map(Arc::new)
        }
        .boxed()
        .shared()
    }
}
