//! Navigation state machine and per-browser session store.
//!
//! A session is a small record owned by one browser (cookie token). Every
//! user action is an [`Event`] consumed by [`transition`], which mutates the
//! session and hands a [`Notice`] to the presentation layer; rendering itself
//! is a separate stateless step. The flow is strictly linear:
//! `Input -> Transition -> Result -> Input`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::source::CommentSource;
use crate::video_id::extract_video_id;

/// Which view the browser currently shows. Replaces the pair of independent
/// booleans the flow could otherwise be modeled with; the ambiguous
/// "flags false but comments populated" combination cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Input,
    Transition,
    Result,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub page: Page,
    pub comments: Vec<String>,
    pub video_url: String,
    pub channel_name: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// User actions, as emitted by the rendered controls.
#[derive(Debug, Clone)]
pub enum Event {
    Analyze { url: String, channel: String },
    GoToAnalysis,
    GoBack,
}

/// Outcome for the presentation layer to display alongside the next view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    None,
    /// Empty URL submitted; stay on the input view.
    EmptyUrl,
    /// No 11-character video id found in the URL.
    InvalidUrl,
    /// Valid id but the source produced nothing (no comments or unreachable).
    NoComments,
    /// Fetch succeeded with this many comments.
    Fetched(usize),
}

/// Runs one state transition. The fetch inside `Analyze` completes before
/// this returns; there is no background work.
pub async fn transition(
    session: &mut Session,
    event: Event,
    source: &dyn CommentSource,
    limit: usize,
) -> Notice {
    match (session.page, event) {
        (Page::Input, Event::Analyze { url, channel }) => {
            let url = url.trim().to_string();
            if url.is_empty() {
                return Notice::EmptyUrl;
            }
            let Some(video_id) = extract_video_id(&url).map(str::to_owned) else {
                return Notice::InvalidUrl;
            };

            let comments = source.fetch(&video_id, limit).await;
            if comments.is_empty() {
                return Notice::NoComments;
            }

            let count = comments.len();
            session.comments = comments;
            session.video_url = url;
            session.channel_name = channel.trim().to_string();
            session.page = Page::Transition;
            Notice::Fetched(count)
        }
        (Page::Transition, Event::GoToAnalysis) => {
            session.page = Page::Result;
            Notice::None
        }
        (Page::Result, Event::GoBack) => {
            session.reset();
            Notice::None
        }
        // The triggering control is not rendered on the current view, so the
        // event can only come from a stale page; ignore it.
        _ => Notice::None,
    }
}

/// In-memory store of independent sessions keyed by an opaque cookie token.
/// Lives for the process lifetime only; nothing is persisted.
pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
    nonce: u64,
    counter: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self {
            inner: Mutex::new(HashMap::new()),
            nonce,
            counter: AtomicU64::new(0),
        }
    }

    /// Mints a fresh unguessable-enough token for a new browser session.
    pub fn mint_token(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let mut hasher = Sha256::new();
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(n.to_le_bytes());
        let digest = hasher.finalize();
        digest.iter().take(16).map(|b| format!("{b:02x}")).collect()
    }

    /// Looks up (or lazily creates) the session for `token` and runs `f`
    /// under the store lock. Mutations only ever happen here, inside the one
    /// active request handler for that session.
    pub fn with_session<R>(&self, token: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut map = self.inner.lock().expect("session store poisoned");
        let session = map.entry(token.to_string()).or_default();
        f(session)
    }

    /// Snapshot for read-only rendering.
    pub fn snapshot(&self, token: &str) -> Session {
        let map = self.inner.lock().expect("session store poisoned");
        map.get(token).cloned().unwrap_or_default()
    }

    /// Stores `session` back under `token` (used after an async transition,
    /// which cannot run under the store lock).
    pub fn put(&self, token: &str, session: Session) {
        let mut map = self.inner.lock().expect("session store poisoned");
        map.insert(token.to_string(), session);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
