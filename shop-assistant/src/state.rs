//! Application state - every component is built once here and handed to the router

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    CatalogCache, ChatService, CompletionClient, GroqClient, HttpProductSource, ProductSource,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Single-flight product catalog cache
    pub catalog: Arc<CatalogCache>,
    /// Chat pipeline (reads the same catalog cache)
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Build state with the HTTP product source and the Groq completion client
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        let source = HttpProductSource::new(&config.products_api_url, config.catalog_timeout)?;
        let completion = GroqClient::new(
            &config.completion_api_url,
            &config.completion_api_key,
            &config.completion_model,
            config.completion_timeout,
        )?;
        tracing::info!(
            model = completion.model(),
            products_url = %config.products_api_url,
            "Upstream clients ready"
        );
        Ok(Self::with_components(Arc::new(source), Arc::new(completion)))
    }

    /// Build state from explicit components
    pub fn with_components(
        source: Arc<dyn ProductSource>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        let catalog = Arc::new(CatalogCache::new(source));
        let chat = Arc::new(ChatService::new(catalog.clone(), completion));
        Self { catalog, chat }
    }
}
