//! Domain Models
//!
//! Everything here lives for one request. JSON field names follow the
//! research panel's wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time market data for one coin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// Price provider's identifier (e.g. "bitcoin")
    pub coin_id: String,

    /// Spot price in USD
    pub price: f64,

    /// 24-hour price change percentage
    pub change24h: Option<f64>,

    /// Market capitalization in USD
    pub market_cap: Option<f64>,

    /// Provider's last update, seconds since epoch
    pub last_updated: Option<i64>,
}

/// One parsed feed entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
    /// Seconds since epoch; 0 when the feed gave no usable date
    pub published_on: i64,
    pub description: String,
}

impl NewsItem {
    /// Case-insensitive substring match against title and description
    pub fn mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        format!("{} {}", self.title, self.description)
            .to_lowercase()
            .contains(&keyword)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.published_on, 0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub summary: String,
    pub price_action: String,
    pub volume: String,
    pub market_sentiment: String,
    pub price: String,
    pub market_cap: String,
    pub change24h: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePrediction {
    pub short_term: String,
    pub medium_term: String,
    pub long_term: String,
    pub key_factors: String,
    pub confidence_level: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsAnalysis {
    pub latest_news: Vec<String>,
    pub sentiment: String,
    pub regulations: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: String,
    pub volatility: String,
    pub key_metrics: Vec<String>,
}

/// Combined research output for one coin
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub coin: String,
    pub timestamp: DateTime<Utc>,
    pub market_data: MarketSnapshot,
    pub news_data: Vec<NewsItem>,
    pub market_analysis: MarketAnalysis,
    pub price_prediction: PricePrediction,
    pub news_analysis: NewsAnalysis,
    pub risk_assessment: RiskAssessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: &str) -> NewsItem {
        NewsItem {
            title: title.into(),
            url: "https://example.com".into(),
            source: "Test".into(),
            published_on: 1_700_000_000,
            description: description.into(),
        }
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        assert!(item("BITCOIN hits record", "").mentions("Bitcoin"));
        assert!(item("Markets", "ether and bitcoin rally").mentions("bitcoin"));
        assert!(!item("Solana upgrade", "validators").mentions("Bitcoin"));
    }

    #[test]
    fn test_wire_field_names() {
        let snapshot = MarketSnapshot {
            coin_id: "bitcoin".into(),
            price: 65000.0,
            change24h: Some(2.5),
            market_cap: Some(1.2e12),
            last_updated: Some(1_700_000_000),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["price"], 65000.0);
        assert_eq!(json["change24h"], 2.5);
        assert_eq!(json["marketCap"], 1.2e12);
        assert_eq!(json["lastUpdated"], 1_700_000_000);

        let json = serde_json::to_value(MarketAnalysis::default()).unwrap();
        assert!(json.get("priceAction").is_some());
        assert!(json.get("marketSentiment").is_some());

        let json = serde_json::to_value(item("t", "d")).unwrap();
        assert_eq!(json["published_on"], 1_700_000_000);
    }
}
