//! Naive lexicon-based polarity scoring.
//!
//! The classifier is a collaborator behind [`PolarityScorer`]; the core only
//! consumes the three-bucket category derived from the continuous score, so
//! any scorer returning `[-1, +1]` can be swapped in (tests use fixed fakes).
//! Scoring runs on raw comment text, never on normalized tokens.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, f32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f32>>(raw).expect("valid sentiment lexicon")
});

/// Continuous polarity in `[-1, +1]`.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f32;
}

/// Three-bucket categorical sentiment derived from polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    /// Fixed threshold mapping: strictly above `0.1` is positive, strictly
    /// below `-0.1` is negative, the closed band between is neutral.
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > 0.1 {
            SentimentCategory::Positive
        } else if polarity < -0.1 {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_weight(&self, w: &str) -> f32 {
        *LEXICON.get(w).unwrap_or(&0.0)
    }

    /// Average lexicon weight over sentiment-bearing tokens, clamped.
    /// Negation: a negator within the previous 1..=3 tokens flips the sign
    /// of a word's weight.
    fn score(&self, text: &str) -> f32 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut sum = 0.0f32;
        let mut hits = 0usize;

        for i in 0..tokens.len() {
            let base = self.word_weight(tokens[i].as_str());
            if base != 0.0 {
                let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
                sum += if negated { -base } else { base };
                hits += 1;
            }
        }

        if hits == 0 {
            0.0
        } else {
            (sum / hits as f32).clamp(-1.0, 1.0)
        }
    }
}

impl PolarityScorer for SentimentAnalyzer {
    fn polarity(&self, text: &str) -> f32 {
        self.score(text)
    }
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

fn is_negator(tok: &str) -> bool {
    // Apostrophes are token boundaries, so contractions arrive de-apostrophed.
    matches!(
        tok,
        "not" | "no" | "never" | "cannot" | "without" | "dont" | "didnt" | "doesnt" | "isnt"
            | "wasnt" | "arent" | "wont" | "cant"
    )
}
