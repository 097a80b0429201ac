//! Analysts
//!
//! Four prompt templates over the same market brief. Each template pins the
//! model to a labeled-line answer format, and [`report`] reads those labels
//! back. The labels a role documents in its prompt and the labels its
//! report looks for come from the same tables below.

mod report;

pub use report::{AnalystReport, Report, dash_items, extract_value};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::model::{MarketSnapshot, NewsItem};

/// Headlines embedded in the news researcher's prompt
pub const PROMPT_HEADLINES: usize = 5;

const FORMAT_INSTRUCTION: &str =
    "Please respond with EXACTLY this format (replace text in brackets, keep the exact headings):";
const NO_EXTRA_TEXT: &str = "Do not add any other text or formatting.";
const NO_NEWS: &str = "- No recent news available";

pub const MARKET_LABELS: [&str; 7] = [
    "Summary:",
    "Price Action:",
    "Volume:",
    "Sentiment:",
    "Price:",
    "Market Cap:",
    "24h Change:",
];

pub const PREDICTION_LABELS: [&str; 5] = [
    "Short Term (24h):",
    "Medium Term (1 week):",
    "Long Term (1 month):",
    "Key Factors:",
    "Confidence Level:",
];

pub const NEWS_LABELS: [&str; 2] = ["Sentiment:", "Regulations:"];
pub const NEWS_LIST_HEADING: &str = "Latest News:";

pub const RISK_LABELS: [&str; 2] = ["Risk Level:", "Volatility:"];
pub const RISK_LIST_HEADING: &str = "Key Metrics:";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AnalystRole {
    MarketAnalyst,
    PricePredictor,
    NewsResearcher,
    RiskAssessor,
}

/// Everything a template may embed
#[derive(Clone, Copy, Debug)]
pub struct AnalystBrief<'a> {
    pub coin: &'a str,
    pub market: &'a MarketSnapshot,
    pub news: &'a [NewsItem],
    pub as_of: DateTime<Utc>,
}

impl AnalystBrief<'_> {
    fn price(&self) -> String {
        self.market.price.to_string()
    }

    fn change24h(&self) -> String {
        self.market
            .change24h
            .map_or_else(|| "N/A".to_string(), |c| c.to_string())
    }

    fn timestamp(&self) -> String {
        self.as_of.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// `- {title} ({published}) - {source}` for the newest headlines
    fn headline_lines(&self) -> String {
        if self.news.is_empty() {
            return NO_NEWS.to_string();
        }

        self.news
            .iter()
            .take(PROMPT_HEADLINES)
            .map(|item| {
                let published = item
                    .published_at()
                    .filter(|_| item.published_on > 0)
                    .map_or_else(
                        || "date unknown".to_string(),
                        |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
                    );
                format!("- {} ({published}) - {}", item.title, item.source)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl AnalystRole {
    pub const ALL: [Self; 4] = [
        Self::MarketAnalyst,
        Self::PricePredictor,
        Self::NewsResearcher,
        Self::RiskAssessor,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::MarketAnalyst => "Market Analyst",
            Self::PricePredictor => "Price Predictor",
            Self::NewsResearcher => "News Researcher",
            Self::RiskAssessor => "Risk Assessor",
        }
    }

    /// Single-value labels the report extracts
    pub const fn labels(self) -> &'static [&'static str] {
        match self {
            Self::MarketAnalyst => &MARKET_LABELS,
            Self::PricePredictor => &PREDICTION_LABELS,
            Self::NewsResearcher => &NEWS_LABELS,
            Self::RiskAssessor => &RISK_LABELS,
        }
    }

    /// Heading introducing the role's dash-marked list, if it has one
    pub const fn list_heading(self) -> Option<&'static str> {
        match self {
            Self::NewsResearcher => Some(NEWS_LIST_HEADING),
            Self::RiskAssessor => Some(RISK_LIST_HEADING),
            Self::MarketAnalyst | Self::PricePredictor => None,
        }
    }

    fn task(self, coin: &str) -> String {
        match self {
            Self::MarketAnalyst => format!(
                "current market position of {coin}. Provide real-time market data including price trends, trading volume, and market sentiment."
            ),
            Self::PricePredictor => format!(
                "future price movements of {coin}. Consider market trends, upcoming events, and overall market conditions."
            ),
            Self::NewsResearcher => format!(
                "latest news and developments about {coin}. Focus on recent announcements, partnerships, and market sentiment."
            ),
            Self::RiskAssessor => format!(
                "risk profile of {coin}. Evaluate volatility, market exposure, and potential risk factors."
            ),
        }
    }

    /// Render the full prompt for this role
    pub fn prompt(self, brief: &AnalystBrief<'_>) -> String {
        let task = self.task(brief.coin);
        let price = brief.price();
        let change = brief.change24h();

        match self {
            Self::MarketAnalyst => {
                let [summary, action, volume, sentiment, price_label, cap, change_label] =
                    MARKET_LABELS;
                format!(
                    "You are a Cryptocurrency Market Analyst. Your task is to analyze {task}\n\n\
                     Current Data (as of {timestamp}):\n\
                     - Price: ${price}\n\
                     - 24h Change: {change}%\n\n\
                     {FORMAT_INSTRUCTION}\n\n\
                     {summary} [market overview]\n\
                     {action} [price movements]\n\
                     {volume} [trading volume]\n\
                     {sentiment} [market sentiment]\n\
                     {price_label} ${price}\n\
                     {cap} [market cap]\n\
                     {change_label} {change}%\n\n\
                     {NO_EXTRA_TEXT}",
                    timestamp = brief.timestamp(),
                )
            }
            Self::PricePredictor => {
                let [short, medium, long, factors, confidence] = PREDICTION_LABELS;
                format!(
                    "You are a Cryptocurrency Price Prediction Analyst. Your task is to analyze {task}\n\n\
                     Current Price: ${price} (as of {timestamp})\n\n\
                     {FORMAT_INSTRUCTION}\n\n\
                     {short} [price prediction and reasoning based on current price of ${price}]\n\
                     {medium} [price prediction and reasoning]\n\
                     {long} [price prediction and reasoning]\n\
                     {factors} [list main factors affecting future price]\n\
                     {confidence} [prediction confidence level]\n\n\
                     {NO_EXTRA_TEXT}",
                    timestamp = brief.timestamp(),
                )
            }
            Self::NewsResearcher => {
                let [sentiment, regulations] = NEWS_LABELS;
                let headlines = brief.headline_lines();
                format!(
                    "You are a Cryptocurrency News Researcher. Your task is to analyze {task}\n\n\
                     Recent News Headlines:\n\
                     {headlines}\n\n\
                     {FORMAT_INSTRUCTION}\n\n\
                     {NEWS_LIST_HEADING}\n\
                     {headlines}\n\
                     {sentiment} [analyze the overall sentiment from these news items: Bullish/Neutral/Bearish]\n\
                     {regulations} [extract any regulatory implications from the news]\n\n\
                     {NO_EXTRA_TEXT}"
                )
            }
            Self::RiskAssessor => {
                let [level, volatility] = RISK_LABELS;
                format!(
                    "You are a Cryptocurrency Risk Assessor. Your task is to analyze {task}\n\n\
                     Current Price: ${price}\n\
                     24h Change: {change}%\n\n\
                     {FORMAT_INSTRUCTION}\n\n\
                     {level} [Low/Medium/High based on current metrics]\n\
                     {volatility} [analysis of price volatility]\n\
                     {RISK_LIST_HEADING}\n\
                     - Price volatility: [current volatility level]\n\
                     - Market liquidity: [liquidity assessment]\n\
                     - Network health: [network metrics]\n\n\
                     {NO_EXTRA_TEXT}"
                )
            }
        }
    }
}

impl std::fmt::Display for AnalystRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
