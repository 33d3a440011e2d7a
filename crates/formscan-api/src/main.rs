use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use formscan_extract::MapperOptions;
use formscan_store::MemoryTemplateStore;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formscan_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formscan_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let layered = config.load_layered().context("Failed to load extraction settings")?;
    let mapper_options = MapperOptions::from_config(&layered);

    tracing::info!(
        port = config.port,
        min_overlap_ratio = mapper_options.min_overlap_ratio,
        "Starting FormScan API server"
    );
    tracing::info!("Using in-memory template storage");

    let state = Arc::new(AppState::new(Arc::new(MemoryTemplateStore::new()), mapper_options));

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid FORMSCAN_CORS_ORIGIN: {}", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
