//! Data models for ticker news items and scan results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsItem`]: One normalized news mention of a ticker
//! - [`NewsSource`]: The fixed set of sources a mention can come from
//! - [`FetchOutcome`]: The per-fetcher success/empty/failure taxonomy
//! - [`ScanRecord`] / [`ScanReport`]: The flat result shape handed to callers
//! - [`FilingRecord`] / [`FilingForm`]: Regulatory filing metadata from the
//!   optional filing-repository collaborator

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Maximum number of characters kept from a headline.
pub const HEADLINE_MAX_CHARS: usize = 150;

/// The fixed set of sources a news mention can originate from.
///
/// Serialized by variant name so downstream consumers get a stable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NewsSource {
    /// The company's own investor-relations or newsroom page.
    OfficialIR,
    /// A financial-data aggregator's headline feed.
    AggregatorNews,
    /// A social discussion-forum search feed.
    ForumDiscussion,
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NewsSource::OfficialIR => "Official IR",
            NewsSource::AggregatorNews => "Aggregator News",
            NewsSource::ForumDiscussion => "Forum Discussion",
        };
        write!(f, "{label}")
    }
}

/// One normalized news mention of a ticker.
///
/// Constructed by a source fetcher from a single parsed document fragment
/// and immutable thereafter. The `link` field is the identity key: within
/// one aggregation run no two items share an identical link.
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    /// Uppercase canonical ticker symbol.
    pub ticker: String,
    /// Publication date as a UTC calendar date, serialized `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Headline with newlines collapsed to spaces, at most 150 characters.
    pub headline: String,
    /// Absolute URL of the mention; unique within a result set.
    pub link: String,
    /// Which of the three sources produced this item.
    pub source: NewsSource,
}

impl NewsItem {
    /// Build a news item, applying headline normalization.
    ///
    /// Newlines in the headline are collapsed to single spaces and the
    /// result is truncated to [`HEADLINE_MAX_CHARS`] characters. The ticker
    /// is uppercased.
    pub fn new(
        ticker: &str,
        date: NaiveDate,
        headline: &str,
        link: String,
        source: NewsSource,
    ) -> Self {
        let cleaned = headline
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let headline = cleaned.chars().take(HEADLINE_MAX_CHARS).collect();
        Self {
            ticker: ticker.to_uppercase(),
            date,
            headline,
            link,
            source,
        }
    }
}

/// What a single source fetcher produced for one ticker.
///
/// Fetchers never propagate errors to the orchestrator; a network or parse
/// failure becomes [`FetchOutcome::Failed`] and contributes nothing to the
/// merged result. An empty-but-successful fetch is distinct from a failure.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The fetch succeeded and at least one item passed the cutoff.
    Items(Vec<NewsItem>),
    /// The fetch succeeded but nothing qualified.
    Empty,
    /// The fetch failed (network, HTTP status, or parse error).
    Failed(String),
}

impl FetchOutcome {
    /// Classify a list of items: empty lists become [`FetchOutcome::Empty`].
    pub fn from_items(items: Vec<NewsItem>) -> Self {
        if items.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Items(items)
        }
    }

    /// The items this outcome contributes to the merge (empty on failure).
    pub fn into_items(self) -> Vec<NewsItem> {
        match self {
            FetchOutcome::Items(items) => items,
            FetchOutcome::Empty | FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// One entry in the flat result sequence returned to the caller.
///
/// Serializes untagged: a successful entry is a plain [`NewsItem`] object,
/// a failed ticker is `{"ticker": ..., "error": ...}`, matching the shape
/// presentation layers expect.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanRecord {
    /// A successfully aggregated news item.
    Item(NewsItem),
    /// A per-ticker error or informational condition.
    Error {
        /// The ticker this record belongs to.
        ticker: String,
        /// Human-readable description of what went wrong (or why the
        /// result is empty).
        error: String,
    },
}

/// The full output of one scan: news records plus optional filing lists.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Flat sequence of news items and per-ticker error records.
    pub news: Vec<ScanRecord>,
    /// Regulatory filings per ticker; present only when the filing
    /// repository credential was supplied.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filings: Vec<TickerFilings>,
}

/// Filing lookup results for one ticker.
#[derive(Debug, Serialize)]
pub struct TickerFilings {
    pub ticker: String,
    pub filings: Vec<FilingRecord>,
}

/// The fixed taxonomy of regulatory filing form types.
///
/// Unrecognized codes are preserved verbatim in [`FilingForm::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilingForm {
    TenK,
    TenQ,
    EightK,
    Form4,
    S1,
    S3,
    ThirteenF,
    Def14A,
    F424B5,
    Other(String),
}

impl FilingForm {
    /// Parse a filing form code as reported by the filing repository.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "10-K" => FilingForm::TenK,
            "10-Q" => FilingForm::TenQ,
            "8-K" => FilingForm::EightK,
            "4" => FilingForm::Form4,
            "S-1" => FilingForm::S1,
            "S-3" => FilingForm::S3,
            "13F" | "13F-HR" => FilingForm::ThirteenF,
            "DEF 14A" => FilingForm::Def14A,
            "424B5" => FilingForm::F424B5,
            other => FilingForm::Other(other.to_string()),
        }
    }

    /// The canonical form code string.
    pub fn code(&self) -> &str {
        match self {
            FilingForm::TenK => "10-K",
            FilingForm::TenQ => "10-Q",
            FilingForm::EightK => "8-K",
            FilingForm::Form4 => "4",
            FilingForm::S1 => "S-1",
            FilingForm::S3 => "S-3",
            FilingForm::ThirteenF => "13F",
            FilingForm::Def14A => "DEF 14A",
            FilingForm::F424B5 => "424B5",
            FilingForm::Other(code) => code,
        }
    }
}

impl Serialize for FilingForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl fmt::Display for FilingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One regulatory filing as returned by the filing repository.
#[derive(Debug, Clone, Serialize)]
pub struct FilingRecord {
    /// Filing date, serialized `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Form type from the fixed taxonomy.
    pub form: FilingForm,
    /// Short description of the filing.
    pub description: String,
    /// Link to the filing details.
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_news_item_normalizes_headline() {
        let item = NewsItem::new(
            "nvda",
            date(2025, 5, 6),
            "  NVIDIA\nAnnounces\n  Record Results ",
            "https://example.com/a".to_string(),
            NewsSource::OfficialIR,
        );
        assert_eq!(item.ticker, "NVDA");
        assert_eq!(item.headline, "NVIDIA Announces Record Results");
    }

    #[test]
    fn test_news_item_truncates_headline() {
        let long = "x".repeat(400);
        let item = NewsItem::new(
            "TSLA",
            date(2025, 5, 6),
            &long,
            "https://example.com/b".to_string(),
            NewsSource::AggregatorNews,
        );
        assert_eq!(item.headline.chars().count(), HEADLINE_MAX_CHARS);
    }

    #[test]
    fn test_news_item_serializes_date_as_ymd() {
        let item = NewsItem::new(
            "AMD",
            date(2025, 11, 3),
            "AMD earnings",
            "https://example.com/c".to_string(),
            NewsSource::ForumDiscussion,
        );
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"2025-11-03\""));
        assert!(json.contains("\"ForumDiscussion\""));
    }

    #[test]
    fn test_scan_record_untagged_serialization() {
        let err = ScanRecord::Error {
            ticker: "ZZZZ".to_string(),
            error: "No recent news found in this timeframe.".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"ticker":"ZZZZ","error":"No recent news found in this timeframe."}"#
        );

        let item = ScanRecord::Item(NewsItem::new(
            "GME",
            date(2025, 5, 6),
            "GameStop update",
            "https://example.com/d".to_string(),
            NewsSource::OfficialIR,
        ));
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"source\":\"OfficialIR\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_fetch_outcome_classification() {
        assert!(matches!(
            FetchOutcome::from_items(vec![]),
            FetchOutcome::Empty
        ));
        let items = vec![NewsItem::new(
            "AAPL",
            date(2025, 5, 6),
            "Apple newsroom post",
            "https://example.com/e".to_string(),
            NewsSource::OfficialIR,
        )];
        assert!(matches!(
            FetchOutcome::from_items(items),
            FetchOutcome::Items(_)
        ));
        assert!(
            FetchOutcome::Failed("boom".to_string())
                .into_items()
                .is_empty()
        );
    }

    #[test]
    fn test_filing_form_codes() {
        assert_eq!(FilingForm::from_code("10-K"), FilingForm::TenK);
        assert_eq!(FilingForm::from_code("DEF 14A"), FilingForm::Def14A);
        assert_eq!(FilingForm::from_code("424B5"), FilingForm::F424B5);
        assert_eq!(
            FilingForm::from_code("SC 13G"),
            FilingForm::Other("SC 13G".to_string())
        );
        assert_eq!(FilingForm::from_code("13F-HR"), FilingForm::ThirteenF);
        assert_eq!(FilingForm::TenQ.code(), "10-Q");
    }

    #[test]
    fn test_filing_record_serialization() {
        let record = FilingRecord {
            date: date(2025, 2, 14),
            form: FilingForm::EightK,
            description: "Current report".to_string(),
            link: "https://example.com/f".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"form\":\"8-K\""));
        assert!(json.contains("\"2025-02-14\""));
    }

    #[test]
    fn test_scan_report_skips_empty_filings() {
        let report = ScanReport {
            news: vec![],
            filings: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("filings"));
    }

    #[test]
    fn test_news_source_display() {
        assert_eq!(NewsSource::OfficialIR.to_string(), "Official IR");
        assert_eq!(NewsSource::AggregatorNews.to_string(), "Aggregator News");
        assert_eq!(NewsSource::ForumDiscussion.to_string(), "Forum Discussion");
    }
}
