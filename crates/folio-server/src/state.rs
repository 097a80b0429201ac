//! Application State

use std::sync::Arc;

use folio_core::{ChatResponder, LlmProvider};
use folio_research::{MarketResearcher, NewsDesk};

/// Shared application state; nothing in it changes between requests
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Gemini, or scripted in tests)
    pub provider: Arc<dyn LlmProvider>,

    /// Chat assistant
    pub responder: Arc<ChatResponder>,

    /// Crypto research pipeline
    pub researcher: Arc<MarketResearcher>,

    /// Feed aggregator, also used directly by the news diagnostic
    pub news: Arc<NewsDesk>,
}

impl AppState {
    /// Wire the responder and researcher around one provider
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        market: Arc<dyn folio_research::MarketDataSource>,
        news: Arc<NewsDesk>,
    ) -> Self {
        Self {
            responder: Arc::new(ChatResponder::new(provider.clone())),
            researcher: Arc::new(MarketResearcher::new(market, news.clone(), provider.clone())),
            provider,
            news,
        }
    }
}
