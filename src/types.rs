//! Types for the sentiment report API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the report service API, including the path prefix
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Sentiment classification for a sentence or an aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in their fixed enumeration order
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Lowercase wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    /// Stable CSS class name for the view layer
    pub fn css_class(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "sentiment-positive",
            SentimentLabel::Neutral => "sentiment-neutral",
            SentimentLabel::Negative => "sentiment-negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label sentence counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
}

impl LabelCounts {
    pub fn get(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }
}

/// Per-label ratios or probabilities, each expected in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelRatios {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub negative: f64,
}

impl LabelRatios {
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }
}

/// One filed report in the known-reports listing.
///
/// Identity is the (ticker, date) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportItem {
    pub ticker: String,
    pub date: String,
    /// Section ids present in the filing, in document order
    #[serde(default)]
    pub sections: Vec<String>,
}

/// One analyzed sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSentiment {
    pub text: String,
    /// Category assigned by the analysis service, never recomputed here
    pub label: SentimentLabel,
    /// Per-label probabilities; not required to sum to 1
    #[serde(default)]
    pub confidence: LabelRatios,
}

/// Analyzed sentences and aggregate counts for one report section.
///
/// The sentence list is authoritative when it disagrees with the counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDetail {
    #[serde(default)]
    pub stats: LabelCounts,
    #[serde(default)]
    pub proportions: LabelRatios,
    #[serde(default)]
    pub sentences: Vec<SentenceSentiment>,
}

/// Report-level sentiment totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sentence counts per label
    #[serde(rename = "positive", default)]
    pub positive_count: u64,
    #[serde(rename = "neutral", default)]
    pub neutral_count: u64,
    #[serde(rename = "negative", default)]
    pub negative_count: u64,
    /// Share of sentences per label, in [0, 1]
    #[serde(default)]
    pub positive_ratio: f64,
    #[serde(default)]
    pub neutral_ratio: f64,
    #[serde(default)]
    pub negative_ratio: f64,
}

impl ReportSummary {
    pub fn count(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive_count,
            SentimentLabel::Neutral => self.neutral_count,
            SentimentLabel::Negative => self.negative_count,
        }
    }

    pub fn ratio(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive_ratio,
            SentimentLabel::Neutral => self.neutral_ratio,
            SentimentLabel::Negative => self.negative_ratio,
        }
    }
}

/// Full analysis for one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDetail {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: ReportSummary,
    /// Section id -> analyzed section; key order is irrelevant
    #[serde(default)]
    pub sections: HashMap<String, SectionDetail>,
}

/// One row of the cross-report summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub ticker: String,
    pub date: String,
    pub main_sentiment: SentimentLabel,
    #[serde(default)]
    pub positive_ratio: f64,
    #[serde(default)]
    pub neutral_ratio: f64,
    #[serde(default)]
    pub negative_ratio: f64,
    #[serde(default)]
    pub positive_count: u64,
    #[serde(default)]
    pub neutral_count: u64,
    #[serde(default)]
    pub negative_count: u64,
}

/// Service health probe response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub model_loaded: bool,
}

/// Response from list tickers endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickersResponse {
    pub tickers: Vec<String>,
}

/// Response from list reports endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsResponse {
    pub reports: Vec<ReportItem>,
}

/// Response from summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: Vec<SummaryItem>,
}
