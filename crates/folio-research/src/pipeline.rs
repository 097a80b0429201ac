//! Market Analysis Pipeline
//!
//! ```text
//!   coin ──┬── MarketDataSource ──┐
//!          └── NewsDesk ──────────┴──▶ brief ──┬── Market Analyst  ──┐
//!                                              ├── Price Predictor ──┤
//!                                              ├── News Researcher ──┼──▶ AnalysisResult
//!                                              └── Risk Assessor  ───┘
//! ```
//!
//! Market data and news are fetched concurrently; the four analysts run
//! concurrently once both are in. A market-data or model failure fails the
//! whole analysis; there are no partial results.

use std::sync::Arc;

use chrono::Utc;
use folio_core::{GenerationOptions, LlmProvider};
use tracing::Instrument;

use crate::analyst::{AnalystBrief, AnalystReport};
use crate::error::{ResearchError, Result};
use crate::market::MarketDataSource;
use crate::model::{
    AnalysisResult, MarketAnalysis, NewsAnalysis, PricePrediction, RiskAssessment,
};
use crate::news::NewsDesk;

pub struct MarketResearcher {
    market: Arc<dyn MarketDataSource>,
    news: Arc<NewsDesk>,
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl MarketResearcher {
    pub fn new(
        market: Arc<dyn MarketDataSource>,
        news: Arc<NewsDesk>,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            market,
            news,
            provider,
            options: GenerationOptions::analyst(),
        }
    }

    /// Run the full analysis for `coin`
    pub async fn analyze(&self, coin: &str) -> Result<AnalysisResult> {
        let coin = coin.trim();
        if coin.is_empty() {
            return Err(ResearchError::InvalidRequest("coin is required".into()));
        }

        let span = tracing::info_span!("analysis", request_id = %uuid::Uuid::new_v4(), coin);
        self.run(coin).instrument(span).await
    }

    async fn run(&self, coin: &str) -> Result<AnalysisResult> {
        tracing::info!("Analyzing coin");

        let (market, news) = tokio::join!(self.market.snapshot(coin), self.news.for_coin(coin));
        let market = market.inspect_err(|e| {
            tracing::error!(source = self.market.name(), "Error fetching market data: {}", e);
        })?;

        tracing::debug!(?market, headlines = news.len(), "research inputs ready");

        let brief = AnalystBrief {
            coin,
            market: &market,
            news: &news,
            as_of: Utc::now(),
        };

        let (market_analysis, price_prediction, news_analysis, risk_assessment) = tokio::try_join!(
            self.consult::<MarketAnalysis>(&brief),
            self.consult::<PricePrediction>(&brief),
            self.consult::<NewsAnalysis>(&brief),
            self.consult::<RiskAssessment>(&brief),
        )?;

        Ok(AnalysisResult {
            coin: coin.to_string(),
            timestamp: Utc::now(),
            market_data: market,
            news_data: news,
            market_analysis,
            price_prediction,
            news_analysis,
            risk_assessment,
        })
    }

    /// Prompt one analyst and parse its answer
    async fn consult<R: AnalystReport>(&self, brief: &AnalystBrief<'_>) -> Result<R> {
        let role = R::ROLE;
        let prompt = role.prompt(brief);

        let completion = self
            .provider
            .complete(&prompt, &self.options)
            .await
            .inspect_err(|e| tracing::error!(analyst = %role, "Error in analysis: {}", e))?;

        tracing::debug!(analyst = %role, raw = %completion.content, "analyst raw response");
        Ok(R::parse(&completion.content))
    }
}
