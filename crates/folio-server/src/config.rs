//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use folio_research::market::CoinGeckoConfig;
use folio_research::news::RssReaderConfig;
use folio_runtime::GeminiConfig;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Prebuilt site assets served for unmatched GET paths
    pub static_dir: String,

    pub gemini: GeminiConfig,
    pub coingecko: CoinGeckoConfig,
    pub feeds: RssReaderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            static_dir: "static".into(),
            gemini: GeminiConfig::default(),
            coingecko: CoinGeckoConfig::default(),
            feeds: RssReaderConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            gemini: GeminiConfig::from_env(),
            coingecko: CoinGeckoConfig::from_env(),
            feeds: RssReaderConfig::from_env(),
        }
    }
}
