//! HTTP surface: one page, three actions.
//!
//! Each handler runs exactly one state transition to completion (including
//! the blocking comment fetch) and then renders the session's current view.
//! Browser sessions are identified by an opaque cookie; state never leaks
//! across sessions.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap,
    },
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::analytics::{build_report, CommentReport};
use crate::config::AppConfig;
use crate::render::{render_page, Background};
use crate::sentiment::{PolarityScorer, SentimentAnalyzer};
use crate::session::{transition, Event, Notice, Page, Session, SessionStore};
use crate::source::{CommentSource, YoutubeCommentSource};

const SESSION_COOKIE: &str = "ytca_session";

#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionStore>,
    source: Arc<dyn CommentSource>,
    scorer: Arc<dyn PolarityScorer>,
    background: Arc<Background>,
    comment_limit: usize,
}

impl AppState {
    pub fn new(
        source: Arc<dyn CommentSource>,
        scorer: Arc<dyn PolarityScorer>,
        background: Background,
        comment_limit: usize,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            source,
            scorer,
            background: Arc::new(background),
            comment_limit,
        }
    }

    /// Production wiring: live YouTube source + lexicon scorer.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let background = Background::load(&config.background_image)?;
        Ok(Self::new(
            Arc::new(YoutubeCommentSource::new()),
            Arc::new(SentimentAnalyzer::new()),
            background,
            config.comment_limit,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/analyze", post(analyze))
        .route("/continue", post(go_to_analysis))
        .route("/back", post(go_back))
        .route("/health", get(|| async { "ok" }))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct AnalyzeForm {
    #[serde(default)]
    video_url: String,
    #[serde(default)]
    channel_name: String,
}

async fn show_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (token, minted) = session_token(&state, &headers);
    let session = state.sessions.snapshot(&token);
    respond(&state, &session, &Notice::None, minted.then_some(token))
}

async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let event = Event::Analyze {
        url: form.video_url,
        channel: form.channel_name,
    };
    run_transition(state, headers, event).await
}

async fn go_to_analysis(State(state): State<AppState>, headers: HeaderMap) -> Response {
    run_transition(state, headers, Event::GoToAnalysis).await
}

async fn go_back(State(state): State<AppState>, headers: HeaderMap) -> Response {
    run_transition(state, headers, Event::GoBack).await
}

/// Shared request flow: resolve the session, apply the event, store the
/// result, render. The fetch inside `Analyze` happens here, outside the
/// store lock, so other sessions are never blocked on it.
async fn run_transition(state: AppState, headers: HeaderMap, event: Event) -> Response {
    let (token, minted) = session_token(&state, &headers);
    let mut session = state.sessions.snapshot(&token);
    let notice = transition(
        &mut session,
        event,
        state.source.as_ref(),
        state.comment_limit,
    )
    .await;
    state.sessions.put(&token, session.clone());
    respond(&state, &session, &notice, minted.then_some(token))
}

fn respond(state: &AppState, session: &Session, notice: &Notice, new_token: Option<String>) -> Response {
    let report: Option<CommentReport> = (session.page == Page::Result)
        .then(|| build_report(&session.comments, state.scorer.as_ref()));
    let html = render_page(session, notice, report.as_ref(), &state.background);

    match new_token {
        Some(token) => {
            let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
            ([(SET_COOKIE, cookie)], Html(html)).into_response()
        }
        None => Html(html).into_response(),
    }
}

/// Token from the request cookie, or a freshly minted one. The bool flags
/// whether `Set-Cookie` must go out with the response.
fn session_token(state: &AppState, headers: &HeaderMap) -> (String, bool) {
    let prefix = format!("{SESSION_COOKIE}=");
    let existing = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| {
            raw.split(';')
                .map(str::trim)
                .find_map(|pair| pair.strip_prefix(prefix.as_str()))
                .map(str::to_owned)
        });
    match existing {
        Some(token) if !token.is_empty() => (token, false),
        _ => (state.sessions.mint_token(), true),
    }
}
