//! CoinGecko Price Client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{MarketDataSource, coin_id_for};
use crate::error::{ResearchError, Result};
use crate::model::MarketSnapshot;

#[derive(Clone, Debug)]
pub struct CoinGeckoConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".into(),
            timeout_secs: 30,
        }
    }
}

impl CoinGeckoConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("COINGECKO_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        Self { base_url, ..defaults }
    }
}

/// Spot prices from CoinGecko's `simple/price` endpoint
pub struct CoinGeckoClient {
    client: Client,
    config: CoinGeckoConfig,
}

impl CoinGeckoClient {
    pub fn new(config: CoinGeckoConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResearchError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(CoinGeckoConfig::from_env())
    }

    async fn fetch_price(&self, coin_id: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/simple/price", self.config.base_url))
            .query(&[
                ("ids", coin_id),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
                ("include_market_cap", "true"),
                ("include_last_updated_at", "true"),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResearchError::MarketData(format!(
                "CoinGecko API error: {status} - {body}"
            )));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Err(ResearchError::MarketData("Empty response from CoinGecko".into()));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull one coin's entry out of a `simple/price` response.
///
/// The entry must exist and carry a numeric `usd` price.
pub fn snapshot_from_response(coin_id: &str, data: &Value) -> Result<MarketSnapshot> {
    let entry = data
        .get(coin_id)
        .and_then(Value::as_object)
        .ok_or_else(|| ResearchError::CoinNotFound(coin_id.to_string()))?;

    let price = entry
        .get("usd")
        .and_then(Value::as_f64)
        .ok_or_else(|| ResearchError::MarketData(format!("no USD price for {coin_id}")))?;

    Ok(MarketSnapshot {
        coin_id: coin_id.to_string(),
        price,
        change24h: entry.get("usd_24h_change").and_then(Value::as_f64),
        market_cap: entry.get("usd_market_cap").and_then(Value::as_f64),
        last_updated: entry.get("last_updated_at").and_then(Value::as_i64),
    })
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn snapshot(&self, coin: &str) -> Result<MarketSnapshot> {
        let coin_id = coin_id_for(coin);
        let data = self.fetch_price(&coin_id).await?;
        snapshot_from_response(&coin_id, &data)
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_from_response() {
        let data = json!({
            "bitcoin": {
                "usd": 65000,
                "usd_24h_change": 2.5,
                "usd_market_cap": 1.2e12,
                "last_updated_at": 1_700_000_000
            }
        });

        let snapshot = snapshot_from_response("bitcoin", &data).unwrap();
        assert!((snapshot.price - 65000.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.change24h, Some(2.5));
        assert_eq!(snapshot.market_cap, Some(1.2e12));
        assert_eq!(snapshot.last_updated, Some(1_700_000_000));
    }

    #[test]
    fn test_missing_coin_is_an_error() {
        let data = json!({ "ethereum": { "usd": 3400 } });
        let result = snapshot_from_response("bitcoin", &data);
        assert!(matches!(result, Err(ResearchError::CoinNotFound(ref id)) if id == "bitcoin"));

        let result = snapshot_from_response("bitcoin", &json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_without_price_is_an_error() {
        let data = json!({ "bitcoin": { "usd_24h_change": 1.0 } });
        assert!(matches!(
            snapshot_from_response("bitcoin", &data),
            Err(ResearchError::MarketData(_))
        ));
    }

    #[test]
    fn test_optional_fields() {
        let data = json!({ "dogecoin": { "usd": 0.38 } });
        let snapshot = snapshot_from_response("dogecoin", &data).unwrap();
        assert_eq!(snapshot.change24h, None);
        assert_eq!(snapshot.market_cap, None);
    }

    mod http {
        use httpmock::prelude::*;
        use serde_json::json;

        use super::*;

        fn client_for(server: &MockServer) -> CoinGeckoClient {
            CoinGeckoClient::new(CoinGeckoConfig {
                base_url: server.base_url(),
                timeout_secs: 5,
            })
            .unwrap()
        }

        #[tokio::test]
        async fn test_snapshot_over_http() {
            let server = MockServer::start_async().await;
            let price = server
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/simple/price")
                        .query_param("ids", "bitcoin")
                        .query_param("vs_currencies", "usd")
                        .query_param("include_24hr_change", "true");
                    then.status(200).json_body(json!({
                        "bitcoin": { "usd": 65000, "usd_24h_change": -1.25, "last_updated_at": 1_700_000_000 }
                    }));
                })
                .await;

            let snapshot = client_for(&server).snapshot("Bitcoin").await.unwrap();

            price.assert_async().await;
            assert_eq!(snapshot.coin_id, "bitcoin");
            assert!((snapshot.price - 65000.0).abs() < f64::EPSILON);
            assert_eq!(snapshot.change24h, Some(-1.25));
            assert_eq!(snapshot.market_cap, None);
        }

        #[tokio::test]
        async fn test_error_status_is_a_market_data_error() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/simple/price");
                    then.status(500).body("upstream down");
                })
                .await;

            let result = client_for(&server).snapshot("Bitcoin").await;
            assert!(
                matches!(result, Err(ResearchError::MarketData(ref msg)) if msg.contains("500")),
                "{result:?}"
            );
        }

        #[tokio::test]
        async fn test_empty_body_is_a_market_data_error() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/simple/price");
                    then.status(200).body("");
                })
                .await;

            let result = client_for(&server).snapshot("Bitcoin").await;
            assert!(matches!(result, Err(ResearchError::MarketData(_))), "{result:?}");
        }

        #[tokio::test]
        async fn test_unknown_coin_over_http() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/simple/price").query_param("ids", "notacoin");
                    then.status(200).json_body(json!({}));
                })
                .await;

            let result = client_for(&server).snapshot("Notacoin").await;
            assert!(matches!(result, Err(ResearchError::CoinNotFound(ref id)) if id == "notacoin"));
            assert_eq!(result.unwrap_err().user_message(), "Failed to fetch market data");
        }
    }
}
