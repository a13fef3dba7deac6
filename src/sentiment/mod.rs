//! Article-level sentiment from sentence-level polarity scores.
//!
//! An article body is cut into sentence units on the literal `". "`, every
//! unit is scored on its own blocking task, and the compound scores are
//! summed. The sign of the sum gives the overall label.
//!
//! The scorer is built once at startup (see [`vader::VaderScorer`]) and
//! shared by every analysis through an `Arc`.

pub mod vader;

use crate::error::SentimentError;
use crate::models::{ArticleRecord, Sentiment, SentimentResult};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A lexicon-based polarity scorer.
pub trait PolarityScorer: Send + Sync {
    /// Compound polarity of `text` in [-1, 1].
    fn compound(&self, text: &str) -> f64;
}

/// Label for a single sentence: zero counts as positive.
pub fn sentence_label(score: f64) -> Sentiment {
    if score >= 0.0 {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    }
}

/// Split text into sentence units on `". "`. Not a real sentence tokenizer.
pub fn split_sentences(content: &str) -> Vec<&str> {
    content.split(". ").collect()
}

/// Scores whole articles with a shared [`PolarityScorer`].
#[derive(Clone)]
pub struct SentimentAggregator {
    scorer: Arc<dyn PolarityScorer>,
}

impl SentimentAggregator {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Aggregate sentiment of `record.content`.
    ///
    /// Empty content is neutral and never reaches the scorer. The sum is
    /// taken in sentence order, so repeated calls give identical results.
    #[instrument(level = "info", skip_all, fields(name = %record.name))]
    pub async fn analyse(&self, record: &ArticleRecord) -> Result<SentimentResult, SentimentError> {
        if record.content.is_empty() {
            debug!("Empty content; neutral without scoring");
            return Ok(SentimentResult::neutral());
        }

        let handles = split_sentences(&record.content)
            .into_iter()
            .map(|unit| {
                let scorer = Arc::clone(&self.scorer);
                let unit = unit.to_string();
                tokio::task::spawn_blocking(move || scorer.compound(&unit))
            })
            .collect::<Vec<_>>();

        let scores = join_all(handles)
            .await
            .into_iter()
            .collect::<Result<Vec<f64>, _>>()?;

        let positive = scores
            .iter()
            .filter(|s| sentence_label(**s) == Sentiment::Positive)
            .count();
        let weighted_sum: f64 = scores.iter().sum();
        let overall_sentiment = Sentiment::from_sum(weighted_sum);

        info!(
            sentences = scores.len(),
            positive,
            negative = scores.len() - positive,
            weighted_sum,
            ?overall_sentiment,
            "Analysed article sentiment"
        );
        Ok(SentimentResult {
            weighted_sum,
            overall_sentiment,
        })
    }
}
