//! Derived analytics over a fetched comment batch.
//!
//! The report is recomputed from the session's comments on every render of
//! the result view. Nothing here caches or mutates incrementally; the batch
//! is bounded (≤ the fetch cap), so full scans are fine.

use crate::aggregate;
use crate::emoji::extract_emojis;
use crate::normalize::clean_tokens;
use crate::sentiment::{PolarityScorer, SentimentCategory};

pub const TOP_N: usize = 10;
pub const SAMPLE_COMMENTS: usize = 10;

/// Everything the result view needs, in display order.
#[derive(Debug, Clone)]
pub struct CommentReport {
    pub total_comments: usize,
    pub samples: Vec<String>,
    pub top_words: Vec<(String, usize)>,
    pub top_emojis: Vec<(char, usize)>,
    /// All categories present, descending count, untruncated.
    pub sentiment_counts: Vec<(SentimentCategory, usize)>,
}

impl CommentReport {
    pub fn sentiment_count(&self, category: SentimentCategory) -> usize {
        self.sentiment_counts
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Builds the three aggregates plus samples. Word frequency runs on
/// normalized tokens; emoji extraction and sentiment run on raw text.
pub fn build_report(comments: &[String], scorer: &dyn PolarityScorer) -> CommentReport {
    let words = comments.iter().flat_map(|c| clean_tokens(c));
    let top_words = aggregate::top_n(words, TOP_N);

    let emojis = comments.iter().flat_map(|c| extract_emojis(c));
    let top_emojis = aggregate::top_n(emojis, TOP_N);

    let categories = comments
        .iter()
        .map(|c| SentimentCategory::from_polarity(scorer.polarity(c)));
    let sentiment_counts = aggregate::count_all(categories);

    CommentReport {
        total_comments: comments.len(),
        samples: comments.iter().take(SAMPLE_COMMENTS).cloned().collect(),
        top_words,
        top_emojis,
        sentiment_counts,
    }
}
