//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::StatusCode;
use http_body_util::BodyExt;
use shared::models::Catalog;
use shop_assistant::services::{CatalogError, CompletionClient, CompletionError, ProductSource};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn sample_catalog_json() -> serde_json::Value {
    serde_json::json!({
        "products": [
            {
                "id": 1, "title": "Kiwi Fruit", "description": "Sweet green kiwi.",
                "category": "fruits", "price": 2.5, "rating": 4.2, "stock": 10,
                "tags": ["fruits"], "reviews": [{"rating": 5, "comment": "Tasty"}]
            },
            {
                "id": 2, "title": "Wireless Mouse", "description": "Ergonomic mouse.",
                "category": "electronics", "price": 19.99, "rating": 4.0, "stock": 42,
                "brand": "Logitech", "warrantyInformation": "1 year warranty",
                "shippingInformation": "Ships in 2 days", "availabilityStatus": "In Stock"
            }
        ],
        "total": 194,
        "skip": 0,
        "limit": 200
    })
}

pub fn sample_catalog() -> Catalog {
    serde_json::from_value(sample_catalog_json()).unwrap()
}

/// Product source that counts fetches and fails the first `failures` calls
pub struct MockSource {
    pub calls: AtomicUsize,
    failures: usize,
    delay: Duration,
}

impl MockSource {
    pub fn healthy() -> Self {
        Self::failing(0)
    }

    pub fn failing(failures: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures,
            delay: Duration::ZERO,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures: 0,
            delay,
        }
    }

    /// Every fetch fails after `delay`
    pub fn down(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures: usize::MAX,
            delay,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for MockSource {
    async fn fetch(&self, _limit: u32) -> Result<Catalog, CatalogError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if call < self.failures {
            return Err(CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(sample_catalog())
    }
}

/// Completion client returning a fixed answer (or failing) and recording prompts
pub struct MockCompletion {
    pub user_prompts: Mutex<Vec<String>>,
    answer: Option<String>,
}

impl MockCompletion {
    pub fn answering(answer: &str) -> Self {
        Self {
            user_prompts: Mutex::new(Vec::new()),
            answer: Some(answer.to_string()),
        }
    }

    pub fn without_choices() -> Self {
        Self {
            user_prompts: Mutex::new(Vec::new()),
            answer: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.user_prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        self.user_prompts
            .lock()
            .unwrap()
            .push(user_prompt.to_string());
        self.answer.clone().ok_or(CompletionError::NoChoices)
    }
}

/// Serve `router` on an ephemeral local port, returning its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
