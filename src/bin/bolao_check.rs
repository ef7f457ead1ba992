//! Bolão - terminálová kontrola sázek
//!
//! Spuštění:
//!   cargo run --bin bolao-check                 # vzorový bolão
//!   cargo run --bin bolao-check -- jogos.txt    # sázky ze souboru
//!   cat jogos.txt | cargo run --bin bolao-check -- -

use anyhow::{bail, Context, Result};
use bet_scorer::MEGA_SENA;
use bolao::render::render_report;
use bolao::{AppConfig, CheckSession, SAMPLE_POOL};
use dotenv::dotenv;
use draw_fetcher::DrawFetcher;
use std::io::Read;
use tracing_subscriber::{fmt, EnvFilter};

fn read_input(arg: Option<String>) -> Result<String> {
    match arg.as_deref() {
        None => Ok(SAMPLE_POOL.to_string()),
        Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("stdin read failed")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("cannot read {path}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // tabulka jde na stdout, logy na stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let text = read_input(std::env::args().nth(1))?;

    let fetcher = DrawFetcher::new(MEGA_SENA, config.providers, config.fetch_timeout)
        .context("HTTP client init failed")?
        .with_event_log(&config.log_dir);

    let mut session = CheckSession::new(MEGA_SENA, text);
    session.run_check(&fetcher).await;

    print!("{}", render_report(&session));

    if let Some(err) = session.error() {
        bail!("{err}");
    }
    Ok(())
}
