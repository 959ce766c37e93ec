use shop_assistant::{AppState, Config, create_router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_assistant=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting shop-assistant (env: {})", config.environment);

    let state = AppState::new(&config)?;

    // Warm the catalog; a failure here is retried on the first request
    match state.catalog.get_catalog().await {
        Ok(catalog) => tracing::info!(products = catalog.len(), "Catalog preloaded"),
        Err(e) => tracing::warn!("Catalog preload failed, will retry on demand: {e}"),
    }

    let app = create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("shop-assistant HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
