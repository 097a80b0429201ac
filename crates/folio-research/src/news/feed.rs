//! RSS Feed Reader

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use rss::Channel;
use scraper::{Html, Node};

use super::{FeedReader, FeedSource};
use crate::error::{ResearchError, Result};
use crate::model::NewsItem;

const USER_AGENT: &str = concat!("folio-news/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct RssReaderConfig {
    /// Per-feed request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RssReaderConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl RssReaderConfig {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("FEED_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(Self::default().timeout_secs);

        Self { timeout_secs }
    }
}

/// Fetches RSS 2.0 feeds over HTTP
pub struct RssFeedReader {
    client: Client,
}

impl RssFeedReader {
    pub fn new(config: &RssReaderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ResearchError::Config(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedReader for RssFeedReader {
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<NewsItem>> {
        let response = self
            .client
            .get(&source.url)
            .header("Accept", "application/rss+xml, application/xml, text/xml")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResearchError::Feed {
                source_name: source.label.clone(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body = response.bytes().await?;
        let channel = Channel::read_from(&body[..])?;

        Ok(items_from_channel(&channel, &source.label))
    }
}

/// Convert every channel entry to a `NewsItem` tagged with `label`
pub fn items_from_channel(channel: &Channel, label: &str) -> Vec<NewsItem> {
    channel
        .items()
        .iter()
        .map(|item| NewsItem {
            title: item.title().unwrap_or_default().trim().to_string(),
            url: item.link().unwrap_or_default().trim().to_string(),
            source: label.to_string(),
            published_on: item.pub_date().map_or(0, parse_published),
            description: item
                .description()
                .or_else(|| item.content())
                .map(plain_text_snippet)
                .unwrap_or_default(),
        })
        .collect()
}

/// Seconds since epoch from an RFC 2822 (or RFC 3339) date; 0 if neither
fn parse_published(raw: &str) -> i64 {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map_or(0, |dt| dt.timestamp())
}

/// Elements that separate runs of text
const BLOCK_TAGS: [&str; 19] = [
    "br", "p", "div", "li", "ul", "ol", "blockquote", "section", "table", "tr", "td", "hr", "h1",
    "h2", "h3", "h4", "h5", "h6", "figure",
];

/// Plain text of a feed description: markup dropped, every entity decoded,
/// whitespace collapsed
pub fn plain_text_snippet(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Text(run) => text.push_str(run),
            Node::Element(element) if BLOCK_TAGS.contains(&element.name()) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Sample Crypto News</title>
    <link>https://news.example</link>
    <description>Sample</description>
    <item>
      <title>Bitcoin tops $65,000</title>
      <link>https://news.example/btc</link>
      <pubDate>Tue, 14 Nov 2023 22:13:20 +0000</pubDate>
      <description><![CDATA[<p>Bitcoin &amp; ether <b>rallied</b> overnight.</p>]]></description>
    </item>
    <item>
      <title>Undated item</title>
      <link>https://news.example/undated</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_items_from_channel() {
        let channel = Channel::read_from(SAMPLE.as_bytes()).unwrap();
        let items = items_from_channel(&channel, "Sample");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Bitcoin tops $65,000");
        assert_eq!(items[0].url, "https://news.example/btc");
        assert_eq!(items[0].source, "Sample");
        assert_eq!(items[0].published_on, 1_700_000_000);
        assert_eq!(items[0].description, "Bitcoin & ether rallied overnight.");

        assert_eq!(items[1].published_on, 0);
        assert_eq!(items[1].description, "");
    }

    #[test]
    fn test_parse_published() {
        assert_eq!(parse_published("Tue, 14 Nov 2023 22:13:20 GMT"), 1_700_000_000);
        assert_eq!(parse_published("2023-11-14T22:13:20Z"), 1_700_000_000);
        assert_eq!(parse_published("yesterday"), 0);
    }

    #[test]
    fn test_plain_text_snippet() {
        assert_eq!(
            plain_text_snippet("<p>Hello&nbsp;<a href=\"x\">world</a></p>\n\n<p>again</p>"),
            "Hello world again"
        );
        assert_eq!(plain_text_snippet("<p>one</p><p>two</p>"), "one two");
        assert_eq!(plain_text_snippet("no markup"), "no markup");
    }

    #[test]
    fn test_snippet_decodes_numeric_and_named_entities() {
        assert_eq!(
            plain_text_snippet("Bitcoin rallies past resistance [&#8230;]"),
            "Bitcoin rallies past resistance [\u{2026}]"
        );
        assert_eq!(
            plain_text_snippet("ETF flows &#8211; record week"),
            "ETF flows \u{2013} record week"
        );
        assert_eq!(
            plain_text_snippet("Solana&#x27;s upgrade &hellip;"),
            "Solana's upgrade \u{2026}"
        );
        assert_eq!(
            plain_text_snippet("The post appeared first on Decrypt.&#160;"),
            "The post appeared first on Decrypt."
        );
        assert_eq!(plain_text_snippet("fees &lt; 1% &amp; rising"), "fees < 1% & rising");
    }

    #[test]
    fn test_malformed_feed_is_an_error() {
        assert!(Channel::read_from("<html>not a feed</html>".as_bytes()).is_err());
    }

    mod http {
        use httpmock::prelude::*;

        use super::*;

        fn reader() -> RssFeedReader {
            RssFeedReader::new(&RssReaderConfig::default()).unwrap()
        }

        #[tokio::test]
        async fn test_fetch_parses_feed() {
            let server = MockServer::start_async().await;
            let feed = server
                .mock_async(|when, then| {
                    when.method(GET).path("/rss");
                    then.status(200)
                        .header("content-type", "application/rss+xml")
                        .body(SAMPLE);
                })
                .await;

            let source = FeedSource::new(server.url("/rss"), "Sample");
            let items = reader().fetch(&source).await.unwrap();

            feed.assert_async().await;
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].source, "Sample");
            assert_eq!(items[0].description, "Bitcoin & ether rallied overnight.");
        }

        #[tokio::test]
        async fn test_error_status_is_a_feed_error() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/rss");
                    then.status(500);
                })
                .await;

            let source = FeedSource::new(server.url("/rss"), "Broken");
            let result = reader().fetch(&source).await;

            assert!(
                matches!(result, Err(ResearchError::Feed { ref source_name, .. }) if source_name == "Broken"),
                "{result:?}"
            );
        }

        #[tokio::test]
        async fn test_non_feed_body_is_an_error() {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/rss");
                    then.status(200).body("<html>maintenance</html>");
                })
                .await;

            let source = FeedSource::new(server.url("/rss"), "Html");
            assert!(matches!(reader().fetch(&source).await, Err(ResearchError::Rss(_))));
        }
    }
}
