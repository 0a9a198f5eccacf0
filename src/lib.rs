// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod analytics;
pub mod api;
pub mod config;
pub mod emoji;
pub mod normalize;
pub mod render;
pub mod sentiment;
pub mod session;
pub mod source;
pub mod video_id;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::sentiment::{PolarityScorer, SentimentAnalyzer, SentimentCategory};
pub use crate::session::{Event, Notice, Page, Session, SessionStore};
pub use crate::source::CommentSource;
