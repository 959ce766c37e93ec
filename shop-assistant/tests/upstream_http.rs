//! Outbound HTTP clients exercised against local stub servers

mod common;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{sample_catalog_json, spawn_stub};
use http::StatusCode;
use shop_assistant::services::completion::{MAX_TOKENS, TEMPERATURE, TOP_P};
use shop_assistant::services::{
    CatalogCache, CatalogError, CompletionClient, CompletionError, GroqClient, HttpProductSource,
    ProductSource,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Product source that answers 503 for the first `failures` requests
async fn product_stub(failures: usize) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/products",
            get(
                |State((hits, failures)): State<(Arc<AtomicUsize>, usize)>,
                 Query(params): Query<HashMap<String, String>>| async move {
                    assert_eq!(params.get("limit").map(String::as_str), Some("200"));
                    if hits.fetch_add(1, Ordering::SeqCst) < failures {
                        return Err(StatusCode::SERVICE_UNAVAILABLE);
                    }
                    Ok(Json(sample_catalog_json()))
                },
            ),
        )
        .with_state((hits.clone(), failures));
    let base = spawn_stub(router).await;
    (format!("{base}/products"), hits)
}

#[tokio::test]
async fn test_http_source_fetches_catalog_with_limit() {
    let (url, hits) = product_stub(0).await;
    let source = HttpProductSource::new(url, TIMEOUT).unwrap();

    let catalog = source.fetch(200).await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.total, 194);
    assert_eq!(catalog.products[0].title, "Kiwi Fruit");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_http_source_reports_upstream_status() {
    let (url, _) = product_stub(usize::MAX).await;
    let source = HttpProductSource::new(url, TIMEOUT).unwrap();

    let err = source.fetch(200).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE)
    ));
}

#[tokio::test]
async fn test_http_source_rejects_non_catalog_body() {
    let router = Router::new().route(
        "/products",
        get(|| async { Json(serde_json::json!({"message": "not a catalog"})) }),
    );
    let base = spawn_stub(router).await;
    let source = HttpProductSource::new(format!("{base}/products"), TIMEOUT).unwrap();

    let err = source.fetch(200).await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn test_cache_over_http_commits_only_on_success() {
    let (url, hits) = product_stub(1).await;
    let cache = CatalogCache::new(Arc::new(HttpProductSource::new(url, TIMEOUT).unwrap()));

    assert!(cache.get_catalog().await.is_err());
    assert!(!cache.is_loaded());

    let catalog = cache.get_catalog().await.unwrap();
    assert_eq!(catalog.len(), 2);
    cache.get_catalog().await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

type Captured = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

/// Completion provider replying with `reply`, capturing auth header and request body
async fn completion_stub(status: StatusCode, reply: serde_json::Value) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(
            "/openai/v1/chat/completions",
            post(
                move |State(captured): State<Captured>,
                 headers: HeaderMap,
                 Json(body): Json<serde_json::Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    captured.lock().unwrap().push((auth, body));
                    (status, Json(reply))
                },
            ),
        )
        .with_state(captured.clone());
    let base = spawn_stub(router).await;
    (format!("{base}/openai/v1"), captured)
}

fn groq(base_url: &str) -> GroqClient {
    GroqClient::new(base_url, "test-key", "llama-3.3-70b-versatile", TIMEOUT).unwrap()
}

#[tokio::test]
async fn test_groq_sends_fixed_request_and_returns_first_choice() {
    let (base, captured) = completion_stub(
        StatusCode::OK,
        serde_json::json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Kiwis are $2.5."}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }),
    )
    .await;

    let answer = groq(&base)
        .complete("system rules", "User question: kiwi")
        .await
        .unwrap();
    assert_eq!(answer, "Kiwis are $2.5.");

    let captured = captured.lock().unwrap();
    let (auth, body) = &captured[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "llama-3.3-70b-versatile");
    assert_eq!(body["temperature"], TEMPERATURE);
    assert_eq!(body["max_tokens"], MAX_TOKENS);
    assert_eq!(body["top_p"], TOP_P);
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "system rules");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "User question: kiwi");
}

#[tokio::test]
async fn test_groq_empty_choices_is_an_error() {
    let (base, _) = completion_stub(StatusCode::OK, serde_json::json!({"choices": []})).await;

    let err = groq(&base).complete("s", "u").await.unwrap_err();
    assert!(matches!(err, CompletionError::NoChoices));
}

#[tokio::test]
async fn test_groq_non_success_status_is_an_error() {
    let (base, _) = completion_stub(
        StatusCode::UNAUTHORIZED,
        serde_json::json!({"error": {"message": "Invalid API Key"}}),
    )
    .await;

    let err = groq(&base).complete("s", "u").await.unwrap_err();
    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("Invalid API Key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_groq_missing_content_is_malformed() {
    let (base, _) = completion_stub(
        StatusCode::OK,
        serde_json::json!({"choices": [{"message": {"role": "assistant"}}]}),
    )
    .await;

    let err = groq(&base).complete("s", "u").await.unwrap_err();
    assert!(matches!(err, CompletionError::Malformed(_)));
}

#[tokio::test]
async fn test_groq_unreachable_provider_is_an_error() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = groq(&format!("http://{addr}"))
        .complete("s", "u")
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Request(_)));
}
