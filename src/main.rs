//! YouTube Comment Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! No CLI flags; configuration comes from the environment (see `config`).

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use yt_comment_analyzer::api::{router, AppState};
use yt_comment_analyzer::config::AppConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("yt_comment_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = AppConfig::from_env();

    // Fatal when the background asset is missing: the page cannot render.
    let state = AppState::from_config(&config).context("building app state")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
