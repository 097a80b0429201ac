//! Market Data
//!
//! Abstractions and implementations for spot price providers.

mod coingecko;
mod fixed;

pub use coingecko::{CoinGeckoClient, CoinGeckoConfig};
pub use fixed::FixedQuotes;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::MarketSnapshot;

/// Display names with a known provider identifier
const KNOWN_COINS: [(&str, &str); 6] = [
    ("Bitcoin", "bitcoin"),
    ("Ethereum", "ethereum"),
    ("Binance Coin", "binancecoin"),
    ("Solana", "solana"),
    ("Ripple", "ripple"),
    ("Cardano", "cardano"),
];

/// Map a coin name to the price provider's identifier.
///
/// Known names use the fixed table; anything else is lowercased with
/// whitespace runs turned into hyphens ("Shiba Inu" -> "shiba-inu").
pub fn coin_id_for(name: &str) -> String {
    let name = name.trim();

    KNOWN_COINS
        .iter()
        .find(|(display, _)| *display == name)
        .map_or_else(
            || name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase(),
            |(_, id)| (*id).to_string(),
        )
}

/// Price provider trait (Strategy pattern)
///
/// A missing coin or an unreachable provider is an error; implementations
/// never substitute zero values.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current snapshot for a coin display name
    async fn snapshot(&self, coin: &str) -> Result<MarketSnapshot>;

    /// Provider name
    fn name(&self) -> &str;
}
