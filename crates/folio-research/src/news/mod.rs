//! News Desk
//!
//! Pulls headlines from several feeds at once. A feed that fails is logged
//! and contributes nothing; it never takes the others down with it.

mod feed;

pub use feed::{RssFeedReader, RssReaderConfig, items_from_channel, plain_text_snippet};

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::Result;
use crate::model::NewsItem;

/// Number of headlines returned by the desk
pub const NEWS_LIMIT: usize = 10;

/// One configured feed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedSource {
    pub url: String,
    /// Label stored on every item from this feed
    pub label: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

/// CoinTelegraph, CryptoNews and Decrypt
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("https://cointelegraph.com/rss", "CoinTelegraph"),
        FeedSource::new("https://cryptonews.com/news/feed/", "CryptoNews"),
        FeedSource::new("https://decrypt.co/feed", "Decrypt"),
    ]
}

/// Feed reader trait (Strategy pattern)
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Fetch and parse every entry of one feed
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<NewsItem>>;
}

/// Newest first, ties keep feed order
fn newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.published_on.cmp(&a.published_on));
}

pub struct NewsDesk {
    reader: Arc<dyn FeedReader>,
    sources: Vec<FeedSource>,
    limit: usize,
}

impl NewsDesk {
    pub fn new(reader: Arc<dyn FeedReader>, sources: Vec<FeedSource>) -> Self {
        Self {
            reader,
            sources,
            limit: NEWS_LIMIT,
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Fetch every source concurrently and merge in source order
    async fn gather(&self) -> Vec<NewsItem> {
        let fetches = self.sources.iter().map(|source| async move {
            match self.reader.fetch(source).await {
                Ok(items) => {
                    tracing::debug!(source = %source.label, count = items.len(), "feed fetched");
                    items
                }
                Err(e) => {
                    tracing::warn!(source = %source.label, "Error fetching feed: {}", e);
                    Vec::new()
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    fn top(&self, mut items: Vec<NewsItem>) -> Vec<NewsItem> {
        newest_first(&mut items);
        items.truncate(self.limit);
        items
    }

    /// Newest items across all sources, unfiltered
    pub async fn latest(&self) -> Vec<NewsItem> {
        let items = self.gather().await;
        self.top(items)
    }

    /// Newest items mentioning `coin`.
    ///
    /// When nothing mentions it, the sources are fetched again and the
    /// newest unfiltered items are returned instead.
    pub async fn for_coin(&self, coin: &str) -> Vec<NewsItem> {
        let matching: Vec<NewsItem> = self
            .gather()
            .await
            .into_iter()
            .filter(|item| item.mentions(coin))
            .collect();

        if matching.is_empty() {
            tracing::info!(coin, "no coin-specific news, falling back to general headlines");
            return self.latest().await;
        }

        self.top(matching)
    }

    /// Newest items with both a title and a link
    pub async fn headlines(&self) -> Vec<NewsItem> {
        let items = self
            .gather()
            .await
            .into_iter()
            .filter(|item| !item.title.is_empty() && !item.url.is_empty())
            .collect();

        self.top(items)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{CannedFeeds, item, sources};
    use super::*;

    #[tokio::test]
    async fn test_failing_source_is_isolated() {
        let feeds = CannedFeeds::default()
            .with_feed("Alpha", (0..6).map(|i| item("Alpha", "Bitcoin news", 100 + i)).collect())
            .with_feed("Gamma", (0..6).map(|i| item("Gamma", "Bitcoin news", 200 + i * 2)).collect());
        // "Beta" has no feed and fails
        let desk = NewsDesk::new(Arc::new(feeds), sources());

        let news = desk.for_coin("bitcoin").await;

        assert_eq!(news.len(), NEWS_LIMIT);
        assert!(news.iter().all(|n| n.source == "Alpha" || n.source == "Gamma"));
        assert!(news.windows(2).all(|w| w[0].published_on >= w[1].published_on));
        assert_eq!(news[0].published_on, 210);
    }

    #[tokio::test]
    async fn test_keyword_filter() {
        let feeds = CannedFeeds::default()
            .with_feed("Alpha", vec![item("Alpha", "Solana outage", 5), item("Alpha", "BITCOIN ETF", 3)])
            .with_feed("Beta", vec![item("Beta", "Ethereum gas", 9)])
            .with_feed("Gamma", vec![]);
        let feeds = Arc::new(feeds);
        let desk = NewsDesk::new(feeds.clone(), sources());

        let news = desk.for_coin("Bitcoin").await;

        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "BITCOIN ETF");
        // matched on the first pass, no second round
        assert_eq!(feeds.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_fallback_runs_only_without_matches() {
        let feeds = CannedFeeds::default()
            .with_feed("Alpha", vec![item("Alpha", "Solana outage", 5)])
            .with_feed("Beta", vec![item("Beta", "Ethereum gas", 9)])
            .with_feed("Gamma", vec![item("Gamma", "Cardano fork", 7)]);
        let feeds = Arc::new(feeds);
        let desk = NewsDesk::new(feeds.clone(), sources());

        let news = desk.for_coin("Dogecoin").await;

        assert_eq!(feeds.fetch_count(), 6);
        let titles: Vec<_> = news.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Ethereum gas", "Cardano fork", "Solana outage"]);
    }

    #[tokio::test]
    async fn test_headlines_drop_incomplete_entries() {
        let mut untitled = item("Alpha", "", 50);
        untitled.title.clear();
        let mut unlinked = item("Alpha", "No link", 40);
        unlinked.url.clear();

        let feeds = CannedFeeds::default()
            .with_feed("Alpha", vec![untitled, unlinked, item("Alpha", "Kept", 30)]);
        let desk = NewsDesk::new(Arc::new(feeds), sources());

        let news = desk.headlines().await;
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "Kept");
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_nothing() {
        let desk = NewsDesk::new(Arc::new(CannedFeeds::default()), sources());
        assert!(desk.latest().await.is_empty());
        assert!(desk.for_coin("bitcoin").await.is_empty());
    }

    #[test]
    fn test_default_sources() {
        let labels: Vec<_> = default_sources().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["CoinTelegraph", "CryptoNews", "Decrypt"]);
    }
}
