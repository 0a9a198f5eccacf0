//! Video identifier extraction.
//!
//! Accepts the two URL shapes YouTube actually serves (`watch?v=` query and
//! `youtu.be/` short links) and rejects everything else. Pure validation:
//! anything that does not carry an 11-character id resolves to `None` and is
//! surfaced to the user as an input error, never sent to the comment source.

use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|youtu\.be/)([A-Za-z0-9_-]{11})").expect("valid video id regex"));

/// Returns the 11-character video id embedded in `url`, or `None`.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
