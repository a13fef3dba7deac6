//! Extractive summaries of article bodies.
//!
//! [`FrequencySummarizer`] keeps the sentences whose content words are most
//! frequent across the whole article, in their original order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+(?:[.!?]+|$)").expect("valid sentence regex"));
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'-]*").expect("valid word regex"));

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "are", "as", "at", "be", "been", "but",
    "by", "can", "could", "for", "from", "had", "has", "have", "he", "her", "his", "i", "if",
    "in", "into", "is", "it", "its", "more", "not", "of", "on", "or", "our", "said", "she",
    "so", "than", "that", "the", "their", "them", "there", "they", "this", "to", "was", "we",
    "were", "which", "who", "will", "with", "would", "you",
];

/// Turns article text into a shorter summary.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> String;
}

/// Word-frequency extractive summarizer.
#[derive(Debug, Clone)]
pub struct FrequencySummarizer {
    sentences: usize,
}

impl FrequencySummarizer {
    pub fn new(sentences: usize) -> Self {
        Self {
            sentences: sentences.max(1),
        }
    }
}

fn sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn content_words(sentence: &str) -> Vec<String> {
    WORD.find_iter(sentence)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect()
}

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, text: &str) -> String {
        let all = sentences(text);
        if all.len() <= self.sentences {
            return all.join(" ");
        }

        let words: Vec<Vec<String>> = all.iter().map(|s| content_words(s)).collect();
        let mut freq: HashMap<&str, usize> = HashMap::new();
        for w in words.iter().flatten() {
            *freq.entry(w.as_str()).or_default() += 1;
        }
        let max = freq.values().copied().max().unwrap_or(1) as f64;

        let mut ranked: Vec<(usize, f64)> = words
            .iter()
            .enumerate()
            .map(|(i, ws)| {
                let score = if ws.is_empty() {
                    0.0
                } else {
                    ws.iter().map(|w| freq[w.as_str()] as f64 / max).sum::<f64>()
                        / ws.len() as f64
                };
                (i, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut keep: Vec<usize> = ranked.iter().take(self.sentences).map(|(i, _)| *i).collect();
        keep.sort_unstable();
        keep.iter().map(|&i| all[i]).collect::<Vec<_>>().join(" ")
    }
}
