//! Chat pipeline: catalog -> matcher -> prompt -> completion

use shared::error::AppError;
use std::sync::Arc;

use super::catalog::CatalogCache;
use super::completion::CompletionClient;
use super::matcher;
use super::prompt::{self, CatalogSummary, SYSTEM_PROMPT};
use crate::error::ServiceResult;

pub struct ChatService {
    catalog: Arc<CatalogCache>,
    completion: Arc<dyn CompletionClient>,
}

impl ChatService {
    pub fn new(catalog: Arc<CatalogCache>, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            catalog,
            completion,
        }
    }

    /// Answer a customer message
    ///
    /// Blank messages are rejected before the catalog or the provider is touched.
    pub async fn respond(&self, message: &str) -> ServiceResult<String> {
        if message.trim().is_empty() {
            return Err(AppError::empty_message().into());
        }

        let catalog = self.catalog.get_catalog().await?;
        let summary = CatalogSummary::from_catalog(&catalog);
        let matches = matcher::search(message, &catalog);
        let user_prompt = prompt::build_prompt(message, &matches, &summary);

        tracing::info!(
            matches = matches.len(),
            top = matches.first().map(|p| p.title.as_str()),
            "Generating chat response"
        );

        Ok(self.completion.complete(SYSTEM_PROMPT, &user_prompt).await?)
    }
}
