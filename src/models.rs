//! Data models for discovered links, extracted articles and their analysis.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Candidate`]: An article link found on a listing page, not yet fetched
//! - [`ArticleRecord`]: The structured fields extracted from one article page
//! - [`StoredArticle`]: An [`ArticleRecord`] as kept by the article store
//! - [`FetchOutcome`]: The per-candidate result of a scrape batch
//! - [`SentimentResult`]: The aggregate sentiment of an article body

use crate::error::FetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Placeholder for category and date when the page does not carry them.
pub const UNKNOWN: &str = "Unknown";

/// An article link discovered on a listing page.
///
/// Candidates are identified by their normalized URL (scheme, host and path
/// only). The `tag` is empty for links found on the main listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The anchor text, used as the article headline.
    pub title: String,
    /// Absolute URL with query and fragment removed.
    pub url: String,
    /// The topic tag whose listing page produced this link.
    pub tag: String,
}

/// A news article as extracted from its detail page.
///
/// `category` and `published_date` fall back to [`UNKNOWN`] and `content`
/// is empty when the page lacks a story body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The headline, carried over from the [`Candidate`] title.
    pub name: String,
    pub url: String,
    pub category: String,
    pub published_date: String,
    /// Body paragraphs joined by single spaces.
    pub content: String,
    pub tag: String,
}

/// An [`ArticleRecord`] with the identity assigned by the store.
///
/// The `id` is generated the first time a headline is inserted and survives
/// later upserts of the same headline.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoredArticle {
    pub id: Uuid,
    pub scraped_at: DateTime<Utc>,
    #[serde(flatten)]
    pub article: ArticleRecord,
}

/// Why a candidate produced no [`ArticleRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The anchor carried no usable href.
    MissingUrl,
    /// The detail request failed, timed out or returned a non-2xx status.
    Fetch(FetchError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingUrl => write!(f, "candidate has no url"),
            SkipReason::Fetch(e) => write!(f, "{e}"),
        }
    }
}

/// The result of fetching and extracting one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(ArticleRecord),
    Skipped { url: String, reason: SkipReason },
}

/// Everything a scrape batch produced, split into records and skips.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<ArticleRecord>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

impl FromIterator<FetchOutcome> for BatchReport {
    fn from_iter<I: IntoIterator<Item = FetchOutcome>>(iter: I) -> Self {
        let mut report = BatchReport::default();
        for outcome in iter {
            match outcome {
                FetchOutcome::Fetched(record) => report.records.push(record),
                FetchOutcome::Skipped { url, reason } => report.skipped.push((url, reason)),
            }
        }
        report
    }
}

/// Polarity label for a sentence or a whole article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Classify an aggregate score: zero is neutral, otherwise the sign decides.
    pub fn from_sum(sum: f64) -> Self {
        if sum == 0.0 {
            Sentiment::Neutral
        } else if sum > 0.0 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

/// Aggregate sentiment of an article body.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SentimentResult {
    /// Sum of the per-sentence compound scores. Not divided by the count.
    pub weighted_sum: f64,
    pub overall_sentiment: Sentiment,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        SentimentResult {
            weighted_sum: 0.0,
            overall_sentiment: Sentiment::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ArticleRecord {
        ArticleRecord {
            name: name.to_string(),
            url: format!("https://www.thestar.com.my/news/nation/{name}"),
            category: "Nation".to_string(),
            published_date: "Monday, 16 Feb 2026".to_string(),
            content: "Body".to_string(),
            tag: String::new(),
        }
    }

    #[test]
    fn test_sentiment_from_sum() {
        assert_eq!(Sentiment::from_sum(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_sum(-0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_sum(0.6), Sentiment::Positive);
        assert_eq!(Sentiment::from_sum(-0.01), Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_result_serialization() {
        let result = SentimentResult {
            weighted_sum: 0.6,
            overall_sentiment: Sentiment::Positive,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"weighted_sum":0.6,"overall_sentiment":"POSITIVE"}"#);
    }

    #[test]
    fn test_stored_article_flattens_record() {
        let stored = StoredArticle {
            id: Uuid::nil(),
            scraped_at: DateTime::parse_from_rfc3339("2026-02-16T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            article: record("flood-warning"),
        };

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["name"], "flood-warning");
        assert_eq!(value["category"], "Nation");
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");

        let back: StoredArticle = serde_json::from_value(value).unwrap();
        assert_eq!(back, stored);
    }

    #[test]
    fn test_batch_report_from_outcomes() {
        let report: BatchReport = vec![
            FetchOutcome::Fetched(record("a")),
            FetchOutcome::Skipped {
                url: "https://www.thestar.com.my/news/x".to_string(),
                reason: SkipReason::MissingUrl,
            },
            FetchOutcome::Fetched(record("b")),
        ]
        .into_iter()
        .collect();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.total(), 3);
    }
}
