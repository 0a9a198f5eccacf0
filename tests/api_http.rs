// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot, with a
// deterministic fake comment source and polarity scorer so no network I/O
// ever happens.
//
// Covered:
// - GET /health
// - GET / (input view + session cookie minting)
// - POST /analyze validation notices (empty URL, invalid URL, empty fetch)
// - POST /analyze success banner

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use yt_comment_analyzer::api::AppState;
use yt_comment_analyzer::render::Background;
use yt_comment_analyzer::sentiment::PolarityScorer;
use yt_comment_analyzer::source::CommentSource;
use yt_comment_analyzer::{router, SentimentAnalyzer};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

struct FixedSource(Vec<String>);

#[async_trait::async_trait]
impl CommentSource for FixedSource {
    async fn fetch(&self, _video_id: &str, limit: usize) -> Vec<String> {
        self.0.iter().take(limit).cloned().collect()
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
}

fn test_router(comments: &[&str]) -> Router {
    let source = FixedSource(comments.iter().map(|s| s.to_string()).collect());
    let scorer: Arc<dyn PolarityScorer> = Arc::new(SentimentAnalyzer::new());
    let state = AppState::new(Arc::new(source), scorer, test_background(), 200);
    router(state)
}

fn test_background() -> Background {
    Background::load("assets/background.jpg").expect("test asset present")
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    String::from_utf8(bytes).expect("utf8")
}

fn form_post(uri: &str, form_body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form_body.to_string()))
        .expect("build form POST")
}

#[tokio::test]
async fn health_returns_200_and_ok_body() {
    let app = test_router(&[]);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await.trim(), "ok");
}

#[tokio::test]
async fn root_renders_input_view_and_mints_session_cookie() {
    let app = test_router(&[]);

    let req = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .expect("build GET /");

    let resp = app.oneshot(req).await.expect("oneshot /");
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("session cookie minted");
    assert!(cookie.starts_with("ytca_session="));

    let html = body_string(resp).await;
    assert!(html.contains("Paste a <b>YouTube video URL</b>"));
    assert!(html.contains("action=\"/analyze\""));
}

#[tokio::test]
async fn analyze_with_empty_url_warns_and_stays_on_input() {
    let app = test_router(&["should not be fetched"]);

    let resp = app
        .oneshot(form_post("/analyze", "video_url=&channel_name="))
        .await
        .expect("oneshot /analyze");
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("Please enter a YouTube video URL"));
    assert!(html.contains("action=\"/analyze\""), "input form still present");
}

#[tokio::test]
async fn analyze_with_malformed_url_shows_invalid_url_error() {
    let app = test_router(&["should not be fetched"]);

    let resp = app
        .oneshot(form_post(
            "/analyze",
            "video_url=https%3A%2F%2Fexample.com&channel_name=",
        ))
        .await
        .expect("oneshot /analyze");

    let html = body_string(resp).await;
    assert!(html.contains("Invalid YouTube URL"));
    assert!(html.contains("action=\"/analyze\""));
}

#[tokio::test]
async fn analyze_with_empty_fetch_shows_no_comments_error() {
    let app = test_router(&[]);

    let resp = app
        .oneshot(form_post(
            "/analyze",
            "video_url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ&channel_name=",
        ))
        .await
        .expect("oneshot /analyze");

    let html = body_string(resp).await;
    assert!(html.contains("No comments found"));
    assert!(html.contains("action=\"/analyze\""));
}

#[tokio::test]
async fn analyze_success_shows_banner_with_comment_count() {
    let app = test_router(&["first", "second", "third"]);

    let resp = app
        .oneshot(form_post(
            "/analyze",
            "video_url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ&channel_name=MyChannel",
        ))
        .await
        .expect("oneshot /analyze");

    let html = body_string(resp).await;
    assert!(html.contains("Fetched 3 comments"));
    assert!(html.contains("action=\"/continue\""), "interstitial view shown");
}
