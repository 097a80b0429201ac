//! # folio-research
//!
//! The crypto research panel's backend: spot prices, recent headlines, and
//! four analyst reports generated from them.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  MarketResearcher::analyze("Bitcoin")                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  1. CoinGecko snapshot  ║  RSS headlines (3 feeds, filtered) │
//! │  2. Market Analyst │ Price Predictor │ News │ Risk  (parallel)│
//! │  3. labeled-line parsing  →  AnalysisResult                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod analyst;
pub mod error;
pub mod market;
pub mod model;
pub mod news;
pub mod pipeline;

pub use analyst::{AnalystReport, AnalystRole};
pub use error::{ResearchError, Result};
pub use market::{CoinGeckoClient, FixedQuotes, MarketDataSource};
pub use model::{
    AnalysisResult, MarketAnalysis, MarketSnapshot, NewsAnalysis, NewsItem, PricePrediction,
    RiskAssessment,
};
pub use news::{FeedReader, FeedSource, NewsDesk, RssFeedReader};
pub use pipeline::MarketResearcher;
