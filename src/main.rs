//! Bolão - HTTP server
//!
//! Co dělá:
//!   1. GET  /api/megasena        -> poslední sorteio (BrasilAPI, fallback Caixa)
//!   2. POST /api/megasena/check  -> vložené sázky vyhodnocené proti sorteiu
//!
//! Co NEDĚLÁ: žádné ukládání sázek, žádná historie losování
//!
//! Spuštění:
//!   cargo run --bin bolao-server

use anyhow::{Context, Result};
use bet_scorer::MEGA_SENA;
use bolao::{create_router, AppConfig, AppState, DrawCache};
use dotenv::dotenv;
use draw_fetcher::DrawFetcher;
use logger::EventLogger;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = AppConfig::from_env()?;

    info!("=== Bolão server ===");
    info!(
        "Providers: {}",
        config.providers.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(" -> ")
    );
    info!("Fetch timeout: {}s, reuse window: {}s", config.fetch_timeout.as_secs(), config.cache_ttl.as_secs());
    info!("Logs: {}/", config.log_dir.display());

    let fetcher = DrawFetcher::new(MEGA_SENA, config.providers.clone(), config.fetch_timeout)
        .context("HTTP client init failed")?
        .with_event_log(&config.log_dir);

    let state = AppState::new(DrawCache::new(config.cache_ttl))
        .with_fetcher(fetcher)
        .with_event_log(EventLogger::new(&config.log_dir));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .context("bind failed")?;
    info!("HTTP API listening on http://{}", config.bind);
    info!("  GET  /health");
    info!("  GET  /api/{}", MEGA_SENA.slug);
    info!("  POST /api/{}/check", MEGA_SENA.slug);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Bolão server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");
}
