//! Analyst Report Parsing
//!
//! Reads labeled lines back out of free-form model text. Parsing never
//! fails: a label that is missing yields an empty string and a missing list
//! yields an empty list.

use super::{
    AnalystRole, MARKET_LABELS, NEWS_LABELS, PREDICTION_LABELS, RISK_LABELS,
};
use crate::model::{MarketAnalysis, NewsAnalysis, PricePrediction, RiskAssessment};

/// Remainder of the first line starting with `label`, trimmed
pub fn extract_value(lines: &[&str], label: &str) -> String {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(label))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Every dash-marked line with the marker removed
pub fn dash_items(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.strip_prefix('-'))
        .map(|item| item.trim().to_string())
        .collect()
}

/// Labeled values and list items read from one analyst answer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    fields: Vec<(&'static str, String)>,
    items: Vec<String>,
}

impl Report {
    /// Parse `raw` against the labels `role` asked for
    pub fn parse(role: AnalystRole, raw: &str) -> Self {
        let lines: Vec<&str> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            tracing::warn!(analyst = %role, "empty analyst response");
        }

        let fields = role
            .labels()
            .iter()
            .map(|label| {
                let value = extract_value(&lines, label);
                if value.is_empty() {
                    tracing::debug!(analyst = %role, label, "label not found");
                }
                (*label, value)
            })
            .collect();

        let items = if role.list_heading().is_some() {
            dash_items(&lines)
        } else {
            Vec::new()
        };

        Self { fields, items }
    }

    /// Value for `label`, empty if the label was not found
    pub fn field(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map_or("", |(_, v)| v.as_str())
    }

    fn take(&self, label: &str) -> String {
        self.field(label).to_string()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

/// A typed record built from one analyst's answer
pub trait AnalystReport: Sized {
    const ROLE: AnalystRole;

    fn from_report(report: &Report) -> Self;

    fn parse(raw: &str) -> Self {
        Self::from_report(&Report::parse(Self::ROLE, raw))
    }
}

impl AnalystReport for MarketAnalysis {
    const ROLE: AnalystRole = AnalystRole::MarketAnalyst;

    fn from_report(report: &Report) -> Self {
        let [summary, action, volume, sentiment, price, cap, change] = MARKET_LABELS;
        Self {
            summary: report.take(summary),
            price_action: report.take(action),
            volume: report.take(volume),
            market_sentiment: report.take(sentiment),
            price: report.take(price),
            market_cap: report.take(cap),
            change24h: report.take(change),
        }
    }
}

impl AnalystReport for PricePrediction {
    const ROLE: AnalystRole = AnalystRole::PricePredictor;

    fn from_report(report: &Report) -> Self {
        let [short, medium, long, factors, confidence] = PREDICTION_LABELS;
        Self {
            short_term: report.take(short),
            medium_term: report.take(medium),
            long_term: report.take(long),
            key_factors: report.take(factors),
            confidence_level: report.take(confidence),
        }
    }
}

impl AnalystReport for NewsAnalysis {
    const ROLE: AnalystRole = AnalystRole::NewsResearcher;

    fn from_report(report: &Report) -> Self {
        let [sentiment, regulations] = NEWS_LABELS;
        Self {
            latest_news: report.items().to_vec(),
            sentiment: report.take(sentiment),
            regulations: report.take(regulations),
        }
    }
}

impl AnalystReport for RiskAssessment {
    const ROLE: AnalystRole = AnalystRole::RiskAssessor;

    fn from_report(report: &Report) -> Self {
        let [level, volatility] = RISK_LABELS;
        Self {
            risk_level: report.take(level),
            volatility: report.take(volatility),
            key_metrics: report.items().to_vec(),
        }
    }
}
