//! VADER compound scoring.
//!
//! Backed by the `vader_sentiment` port of VADER, which bundles the full
//! published `vader_lexicon.txt` and applies the usual rules around each
//! lexicon hit: booster words, negation, ALL-CAPS emphasis, the "but" shift
//! and exclamation/question emphasis. The raw sum is squashed into
//! [-1, 1] with `s / sqrt(s² + 15)`.

use crate::sentiment::PolarityScorer;
use tracing::debug;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Lexicon scorer. Build once at startup and share.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for VaderScorer {
    fn default() -> Self {
        debug!("Building VADER scorer with the bundled lexicon");
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl PolarityScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}
