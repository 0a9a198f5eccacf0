//! Runtime configuration from environment variables (with `.env` support in
//! dev via `dotenvy`, loaded by `main`). No CLI flags.

use std::env;

pub const ENV_BIND_ADDR: &str = "YTCA_BIND_ADDR";
pub const ENV_BACKGROUND_IMAGE: &str = "YTCA_BACKGROUND_IMAGE";
pub const ENV_COMMENT_LIMIT: &str = "YTCA_COMMENT_LIMIT";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_BACKGROUND_IMAGE: &str = "assets/background.jpg";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub background_image: String,
    pub comment_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let background_image = env::var(ENV_BACKGROUND_IMAGE)
            .unwrap_or_else(|_| DEFAULT_BACKGROUND_IMAGE.to_string());
        let comment_limit = parse_limit(env::var(ENV_COMMENT_LIMIT).ok());

        Self {
            bind_addr,
            background_image,
            comment_limit,
        }
    }
}

fn parse_limit(raw: Option<String>) -> usize {
    raw.and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(crate::source::DEFAULT_COMMENT_LIMIT)
}
