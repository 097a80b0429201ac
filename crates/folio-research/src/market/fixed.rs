//! Fixed Quote Source
//!
//! For testing and offline demos. Serves snapshots from a static table.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{MarketDataSource, coin_id_for};
use crate::error::{ResearchError, Result};
use crate::model::MarketSnapshot;

/// In-memory price table keyed by provider identifier
#[derive(Default)]
pub struct FixedQuotes {
    quotes: HashMap<String, MarketSnapshot>,
}

impl FixedQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quote; the coin id is taken from the snapshot
    pub fn with_quote(mut self, snapshot: MarketSnapshot) -> Self {
        self.quotes.insert(snapshot.coin_id.clone(), snapshot);
        self
    }

    /// Quote with price and 24h change only
    pub fn with_price(self, coin_id: &str, price: f64, change24h: f64) -> Self {
        self.with_quote(MarketSnapshot {
            coin_id: coin_id.to_string(),
            price,
            change24h: Some(change24h),
            market_cap: None,
            last_updated: None,
        })
    }
}

#[async_trait]
impl MarketDataSource for FixedQuotes {
    async fn snapshot(&self, coin: &str) -> Result<MarketSnapshot> {
        let coin_id = coin_id_for(coin);
        self.quotes
            .get(&coin_id)
            .cloned()
            .ok_or(ResearchError::CoinNotFound(coin_id))
    }

    fn name(&self) -> &str {
        "FixedQuotes"
    }
}
