//! folio HTTP Server
//!
//! Axum server behind the portfolio site: the chat assistant, the crypto
//! research panel, a news diagnostic, and the prebuilt site assets.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::LlmProvider;
use folio_research::{CoinGeckoClient, NewsDesk, RssFeedReader, news::default_sources};
use folio_runtime::GeminiProvider;

use crate::config::ServerConfig;
use crate::handlers::{chat_handler, crypto_analysis, health_check, news_feed};
use crate::state::AppState;

/// Build the router; unmatched paths fall through to the site assets
pub fn app(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Assistant
        .route("/chat", post(chat_handler))
        // Crypto research
        .route("/crypto-analysis", post(crypto_analysis))
        .route("/news-feed", get(news_feed))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize LLM provider
    let provider = Arc::new(GeminiProvider::from_config(config.gemini.clone())?);
    if provider.is_configured() {
        tracing::info!("✓ Gemini configured (model: {})", config.gemini.model);
    } else {
        tracing::warn!("⚠ GOOGLE_API_KEY not set - chat and analysis will apologize");
    }

    // Market data and news
    let market = Arc::new(CoinGeckoClient::new(config.coingecko.clone())?);
    let reader = Arc::new(RssFeedReader::new(&config.feeds)?);
    let sources = default_sources();
    for source in &sources {
        tracing::info!("  Feed: {} ({})", source.label, source.url);
    }
    let news = Arc::new(NewsDesk::new(reader, sources));

    let state = AppState::new(provider, market, news);
    let app = app(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("folio server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  POST /chat            - Chat assistant");
    tracing::info!("  POST /crypto-analysis - Crypto research report");
    tracing::info!("  GET  /news-feed       - Latest headlines");
    tracing::info!("  GET  /*               - Site assets from {}", config.static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
