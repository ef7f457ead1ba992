//! Bolão - Draw Fetcher
//!
//! Stáhne poslední výsledek losování. Provedery zkouší postupně v pevném
//! pořadí, první použitelný výsledek vyhrává:
//!   1. BrasilAPI
//!   2. Caixa (oficiální portál)
//!
//! Chyba, timeout, ne-2xx status nebo výsledek bez přesně 6 čísel = měkké
//! selhání, jde se na další provider. Žádné retry v rámci jednoho provideru.
//! 2xx s tělem, které není JSON, fetch ukončí (`FetchError::Decode`).

pub mod error;
pub mod provider;

pub use error::{AttemptError, FailedAttempt, FetchError, Result};
pub use provider::{default_providers, ProviderConfig, ProviderShape, BRASILAPI_URL, CAIXA_URL};

use bet_scorer::{DrawnNumbers, Game, ScoreError};
use logger::{now_iso, DrawFetchFailedEvent, DrawFetchedEvent, EventLogger, ProviderAttemptEvent};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// Canonical draw, independent of which provider supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    #[serde(rename = "concurso")]
    pub contest_number: Option<u32>,
    #[serde(rename = "dataApuracao")]
    pub draw_date: Option<String>,
    #[serde(rename = "dezenas")]
    pub drawn_numbers: Vec<String>,
    #[serde(rename = "fonte")]
    pub source_name: String,
}

impl DrawResult {
    pub fn drawn(&self, game: &Game) -> std::result::Result<DrawnNumbers, ScoreError> {
        DrawnNumbers::new(game, &self.drawn_numbers)
    }

    pub fn is_usable(&self, game: &Game) -> bool {
        self.drawn(game).is_ok()
    }
}

pub struct DrawFetcher {
    client:    reqwest::Client,
    game:      Game,
    providers: Vec<ProviderConfig>,
    logger:    Option<EventLogger>,
}

impl DrawFetcher {
    pub fn new(game: Game, providers: Vec<ProviderConfig>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bolao-checker/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            game,
            providers,
            logger: None,
        })
    }

    /// Každý pokus a výsledek se zapíše i do JSONL logu v `log_dir`.
    pub fn with_event_log(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.logger = Some(EventLogger::new(log_dir));
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    pub async fn fetch_latest(&self) -> Result<DrawResult> {
        let mut failed = Vec::new();

        for provider in &self.providers {
            let started = Instant::now();
            let outcome = self.attempt(provider).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(draw) => {
                    info!(
                        provider = %provider.name,
                        contest = ?draw.contest_number,
                        elapsed_ms,
                        "Draw fetched: {}",
                        draw.drawn_numbers.join(" ")
                    );
                    self.log_attempt(provider, None, elapsed_ms);
                    self.log_event(&DrawFetchedEvent {
                        ts:      now_iso(),
                        event:   "DRAW_FETCHED",
                        game:    self.game.slug.to_string(),
                        source:  draw.source_name.clone(),
                        contest: draw.contest_number,
                        numbers: draw.drawn_numbers.clone(),
                    });
                    return Ok(draw);
                }
                // neparsovatelné JSON tělo = neočekávaná chyba, fallback se nezkouší
                Err(AttemptError::InvalidJson(source)) => {
                    let message = format!("invalid JSON: {source}");
                    self.record_attempt(provider, false, Some(200), message, elapsed_ms);
                    return Err(self.give_up(FetchError::Decode {
                        provider: provider.name.clone(),
                        source,
                    }));
                }
                Err(e) => {
                    warn!(provider = %provider.name, elapsed_ms, "Provider failed: {}", e);
                    self.log_attempt(provider, Some(&e), elapsed_ms);
                    failed.push(FailedAttempt { provider: provider.name.clone(), error: e });
                }
            }
        }

        Err(self.give_up(FetchError::AllProvidersFailed { attempts: failed }))
    }

    fn give_up(&self, err: FetchError) -> FetchError {
        warn!("{}", err);
        self.log_event(&DrawFetchFailedEvent {
            ts:        now_iso(),
            event:     "DRAW_FETCH_FAILED",
            game:      self.game.slug.to_string(),
            attempted: err.attempted_providers(),
            message:   err.to_string(),
        });
        err
    }

    async fn attempt(&self, provider: &ProviderConfig) -> std::result::Result<DrawResult, AttemptError> {
        debug!("GET {} ({})", provider.url, provider.name);

        let resp = self
            .client
            .get(&provider.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status));
        }

        let raw = resp.text().await?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let draw = provider.normalize(&self.game, &value);
        draw.drawn(&self.game)?;
        Ok(draw)
    }

    fn log_attempt(&self, provider: &ProviderConfig, error: Option<&AttemptError>, elapsed_ms: u64) {
        self.record_attempt(
            provider,
            error.is_none(),
            error.map_or(Some(200), |e| e.status_code()),
            error.map_or_else(|| "ok".to_string(), |e| e.to_string()),
            elapsed_ms,
        );
    }

    fn record_attempt(
        &self,
        provider: &ProviderConfig,
        ok: bool,
        status_code: Option<u16>,
        message: String,
        elapsed_ms: u64,
    ) {
        self.log_event(&ProviderAttemptEvent {
            ts:          now_iso(),
            event:       "PROVIDER_ATTEMPT",
            game:        self.game.slug.to_string(),
            provider:    provider.name.clone(),
            url:         provider.url.clone(),
            ok,
            status_code,
            message,
            elapsed_ms,
        });
    }

    fn log_event<T: Serialize>(&self, event: &T) {
        if let Some(logger) = &self.logger {
            logger.log_quiet(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use bet_scorer::MEGA_SENA;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn unavailable() -> String {
        let router = Router::new().route(
            "/megasena",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        format!("{}/megasena", serve(router).await)
    }

    async fn brasilapi_ok() -> String {
        let router = Router::new().route(
            "/megasena",
            get(|| async {
                Json(json!({
                    "concurso": 2750,
                    "data": "24/06/2024",
                    "dezenas": ["05", "10", "28", "33", "43", "53"]
                }))
            }),
        );
        format!("{}/megasena", serve(router).await)
    }

    async fn caixa_ok() -> String {
        let router = Router::new().route(
            "/megasena",
            get(|| async {
                Json(json!({
                    "numero": 2750,
                    "dataApuracao": "24/06/2024",
                    "listaDezenas": ["05", "10", "28", "33", "43", "53"]
                }))
            }),
        );
        format!("{}/megasena", serve(router).await)
    }

    fn fetcher(providers: Vec<ProviderConfig>) -> DrawFetcher {
        DrawFetcher::new(MEGA_SENA, providers, Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn first_provider_wins() {
        let f = fetcher(vec![
            ProviderConfig::brasilapi(brasilapi_ok().await),
            ProviderConfig::caixa(caixa_ok().await),
        ]);
        let draw = f.fetch_latest().await.unwrap();
        assert_eq!(draw.source_name, "BrasilAPI");
        assert_eq!(draw.contest_number, Some(2750));
    }

    #[tokio::test]
    async fn falls_back_on_http_error() {
        let f = fetcher(vec![
            ProviderConfig::brasilapi(unavailable().await),
            ProviderConfig::caixa(caixa_ok().await),
        ]);
        let draw = f.fetch_latest().await.unwrap();
        assert_eq!(draw.source_name, "Caixa");
        assert_eq!(draw.drawn_numbers, ["05", "10", "28", "33", "43", "53"]);
    }

    #[tokio::test]
    async fn falls_back_on_malformed_payloads() {
        let router = Router::new()
            .route("/five", get(|| async { Json(json!({ "concurso": 1, "dezenas": ["01", "02", "03", "04", "05"] })) }))
            .route("/seven", get(|| async { Json(json!({ "concurso": 1, "dezenas": ["01", "02", "03", "04", "05", "06", "07"] })) }))
            .route("/dupes", get(|| async { Json(json!({ "concurso": 1, "dezenas": ["01", "01", "03", "04", "05", "06"] })) }));
        let base = serve(router).await;

        let f = fetcher(vec![
            ProviderConfig::brasilapi(format!("{base}/five")),
            ProviderConfig::brasilapi(format!("{base}/seven")),
            ProviderConfig::brasilapi(format!("{base}/dupes")),
            ProviderConfig::caixa(caixa_ok().await),
        ]);
        let draw = f.fetch_latest().await.unwrap();
        assert_eq!(draw.source_name, "Caixa");
    }

    #[tokio::test]
    async fn non_json_body_stops_the_chain() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let fallback = Router::new().route(
            "/megasena",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::OK
                }
            }),
        );
        let fallback = format!("{}/megasena", serve(fallback).await);
        let html = Router::new().route("/megasena", get(|| async { "<html>oops</html>" }));
        let html = format!("{}/megasena", serve(html).await);

        let f = fetcher(vec![ProviderConfig::brasilapi(html), ProviderConfig::caixa(fallback)]);
        let err = f.fetch_latest().await.unwrap_err();
        match &err {
            FetchError::Decode { provider, source } => {
                assert_eq!(provider, "BrasilAPI");
                assert!(source.is_syntax());
            }
            other => panic!("expected decode error, got {other:?}"),
        }
        assert_eq!(err.attempted_providers(), ["BrasilAPI"]);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn timeout_moves_to_next_provider() {
        let router = Router::new().route(
            "/megasena",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );
        let slow = format!("{}/megasena", serve(router).await);

        let f = fetcher(vec![
            ProviderConfig::brasilapi(slow),
            ProviderConfig::caixa(caixa_ok().await),
        ]);
        let started = Instant::now();
        let draw = f.fetch_latest().await.unwrap();
        assert_eq!(draw.source_name, "Caixa");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn all_failing_names_every_provider() {
        let f = fetcher(vec![
            ProviderConfig::brasilapi(unavailable().await),
            ProviderConfig::caixa(unavailable().await),
        ]);
        let err = f.fetch_latest().await.unwrap_err();
        assert_eq!(err.attempted_providers(), ["BrasilAPI", "Caixa"]);
        let msg = err.to_string();
        assert!(msg.contains("BrasilAPI (HTTP 503"), "{msg}");
        assert!(msg.contains("Caixa (HTTP 503"), "{msg}");
    }

    #[tokio::test]
    async fn each_provider_is_tried_once_in_order() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let router = Router::new().route(
            "/megasena",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::BAD_GATEWAY
                }
            }),
        );
        let url = format!("{}/megasena", serve(router).await);

        let f = fetcher(vec![ProviderConfig::brasilapi(url), ProviderConfig::caixa(caixa_ok().await)]);
        f.fetch_latest().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connection_refused_is_soft_failure() {
        // port 9 (discard) na loopbacku nikdo neposlouchá
        let f = fetcher(vec![
            ProviderConfig::brasilapi("http://127.0.0.1:9/megasena"),
            ProviderConfig::caixa(caixa_ok().await),
        ]);
        assert_eq!(f.fetch_latest().await.unwrap().source_name, "Caixa");
    }

    #[tokio::test]
    async fn no_providers_is_total_failure() {
        let err = fetcher(Vec::new()).fetch_latest().await.unwrap_err();
        assert!(matches!(err, FetchError::AllProvidersFailed { ref attempts } if attempts.is_empty()));
    }

    #[tokio::test]
    async fn attempts_are_written_to_event_log() {
        let dir = std::env::temp_dir().join(format!("bolao-fetch-log-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let f = fetcher(vec![
            ProviderConfig::brasilapi(unavailable().await),
            ProviderConfig::caixa(caixa_ok().await),
        ])
        .with_event_log(&dir);
        f.fetch_latest().await.unwrap();

        let log = EventLogger::new(&dir);
        let raw = std::fs::read_to_string(log.current_file()).unwrap();
        let events: Vec<serde_json::Value> =
            raw.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["event"], "PROVIDER_ATTEMPT");
        assert_eq!(events[0]["ok"], false);
        assert_eq!(events[0]["status_code"], 503);
        assert_eq!(events[1]["provider"], "Caixa");
        assert_eq!(events[2]["event"], "DRAW_FETCHED");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn draw_result_wire_names() {
        let draw = DrawResult {
            contest_number: Some(2750),
            draw_date:      Some("24/06/2024".to_string()),
            drawn_numbers:  vec!["05".to_string(); 1],
            source_name:    "BrasilAPI".to_string(),
        };
        let v = serde_json::to_value(&draw).unwrap();
        assert_eq!(v["concurso"], 2750);
        assert_eq!(v["dataApuracao"], "24/06/2024");
        assert_eq!(v["dezenas"][0], "05");
        assert_eq!(v["fonte"], "BrasilAPI");
    }
}
