//! Best-effort YouTube comment client over the public InnerTube endpoint.
//!
//! Flow: scrape the watch page for the InnerTube API key and the comments
//! continuation token, then page through `youtubei/v1/next` collecting comment
//! texts until the cap. The first continuation embedded in the watch page is
//! the "Top comments" ordering, which is the required popularity-first sort.
//! Author, likes and replies are discarded; only the text survives.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::CommentSource;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const NEXT_URL: &str = "https://www.youtube.com/youtubei/v1/next";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const FALLBACK_CLIENT_VERSION: &str = "2.20240101.00.00";

static API_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""INNERTUBE_API_KEY":"([^"]+)""#).expect("valid api key regex"));
static CLIENT_VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""INNERTUBE_CONTEXT_CLIENT_VERSION":"([^"]+)""#).expect("valid version regex")
});
static CONTINUATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""continuationCommand":\{"token":"([^"]+)""#).expect("valid continuation regex")
});

pub struct YoutubeCommentSource {
    client: reqwest::Client,
}

impl YoutubeCommentSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    async fn try_fetch(&self, video_id: &str, limit: usize) -> Result<Vec<String>> {
        let watch_html = self
            .client
            .get(format!("{WATCH_URL}{video_id}"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let api_key = capture(&API_KEY_RE, &watch_html).context("no InnerTube api key")?;
        let client_version = capture(&CLIENT_VERSION_RE, &watch_html)
            .unwrap_or_else(|| FALLBACK_CLIENT_VERSION.to_string());
        let mut token =
            capture(&CONTINUATION_RE, &watch_html).context("no comments continuation")?;

        let mut comments = Vec::new();
        while comments.len() < limit {
            let body = json!({
                "context": {
                    "client": {
                        "clientName": "WEB",
                        "clientVersion": client_version,
                        "hl": "en",
                        "gl": "US",
                    }
                },
                "continuation": token,
            });
            let page: Value = self
                .client
                .post(format!("{NEXT_URL}?key={api_key}&prettyPrint=false"))
                .json(&body)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let before = comments.len();
            collect_comment_texts(&page, &mut comments, limit);
            debug!(video_id, page_comments = comments.len() - before, "comment page fetched");

            match next_continuation(&page) {
                Some(next) if comments.len() > before => token = next,
                _ => break,
            }
        }

        comments.truncate(limit);
        Ok(comments)
    }
}

impl Default for YoutubeCommentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CommentSource for YoutubeCommentSource {
    async fn fetch(&self, video_id: &str, limit: usize) -> Vec<String> {
        match self.try_fetch(video_id, limit).await {
            Ok(comments) => comments,
            Err(err) => {
                warn!(video_id, error = %err, "comment fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "youtube-innertube"
    }
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Walks the response tree collecting comment texts in document order.
/// Handles both the current `commentEntityPayload` shape and the legacy
/// `commentRenderer` runs.
fn collect_comment_texts(node: &Value, out: &mut Vec<String>, limit: usize) {
    if out.len() >= limit {
        return;
    }
    match node {
        Value::Object(map) => {
            if let Some(payload) = map.get("commentEntityPayload") {
                if let Some(text) = payload
                    .pointer("/properties/content/content")
                    .and_then(Value::as_str)
                {
                    out.push(text.to_string());
                    return;
                }
            }
            if let Some(renderer) = map.get("commentRenderer") {
                if let Some(runs) = renderer
                    .pointer("/contentText/runs")
                    .and_then(Value::as_array)
                {
                    let text: String = runs
                        .iter()
                        .filter_map(|r| r.get("text").and_then(Value::as_str))
                        .collect();
                    if !text.is_empty() {
                        out.push(text);
                    }
                    return;
                }
            }
            for value in map.values() {
                collect_comment_texts(value, out, limit);
            }
        }
        Value::Array(items) => {
            for value in items {
                collect_comment_texts(value, out, limit);
            }
        }
        _ => {}
    }
}

/// Next-page token: the trailing `continuationItemRenderer` of the response.
fn next_continuation(node: &Value) -> Option<String> {
    match node {
        Value::Object(map) => {
            if let Some(renderer) = map.get("continuationItemRenderer") {
                if let Some(token) = renderer
                    .pointer("/continuationEndpoint/continuationCommand/token")
                    .and_then(Value::as_str)
                {
                    return Some(token.to_string());
                }
            }
            map.values().find_map(next_continuation)
        }
        Value::Array(items) => items.iter().find_map(next_continuation),
        _ => None,
    }
}
