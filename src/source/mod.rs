//! Comment retrieval.
//!
//! The source owns all network concerns. Its contract is deliberately
//! forgiving: comments arrive popularity-first, capped at `limit`, and every
//! failure mode (unreachable video, disabled comments, parse trouble)
//! collapses to an empty sequence — the caller shows one "no comments found"
//! message either way.

pub mod youtube;

pub use youtube::YoutubeCommentSource;

/// Default retrieval cap per analysis.
pub const DEFAULT_COMMENT_LIMIT: usize = 200;

#[async_trait::async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetches up to `limit` comment texts for `video_id`, popularity-first.
    /// Never errors; an empty vector covers both "no comments" and failure.
    async fn fetch(&self, video_id: &str, limit: usize) -> Vec<String>;

    fn name(&self) -> &'static str;
}
