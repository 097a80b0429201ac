//! Error Types for Market Research

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Cryptocurrency not found: {0}")]
    CoinNotFound(String),

    #[error("Feed error from {source_name}: {message}")]
    Feed {
        source_name: String,
        message: String,
    },

    #[error("No news available at the moment")]
    NoNews,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Analyst error: {0}")]
    Analyst(#[from] folio_core::AssistantError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("RSS parse error: {0}")]
    Rss(#[from] rss::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResearchError {
    /// Message returned to API clients
    pub fn user_message(&self) -> String {
        match self {
            Self::MarketData(_) | Self::CoinNotFound(_) | Self::Network(_) | Self::Serialization(_) => {
                "Failed to fetch market data".into()
            }
            Self::Feed { .. } | Self::Rss(_) => "Failed to fetch news".into(),
            Self::NoNews => "No news available at the moment".into(),
            Self::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            Self::Analyst(e) => e.user_message(),
            Self::Config(_) => "Failed to analyze cryptocurrency".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_failures_share_one_message() {
        let missing = ResearchError::CoinNotFound("notacoin".into());
        let upstream = ResearchError::MarketData("HTTP 502".into());
        assert_eq!(missing.user_message(), upstream.user_message());
        assert_eq!(missing.user_message(), "Failed to fetch market data");
    }
}
