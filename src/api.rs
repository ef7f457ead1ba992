//! HTTP API (axum).
//!
//! Routes:
//! - GET  /health              - Health check
//! - GET  /api/{game}          - Latest draw, provider fallback, 60s reuse window
//! - POST /api/{game}/check    - Body = pasted bets (text), returns draw + scored bets

use crate::draw_cache::DrawCache;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bet_scorer::{parse_bets, score_all, BetOutcome, CheckSummary, Game};
use draw_fetcher::{DrawFetcher, DrawResult, FetchError};
use logger::{now_iso, BolaoCheckedEvent, EventLogger};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Sdílený stav handlerů.
pub struct AppState {
    fetchers: HashMap<&'static str, DrawFetcher>,
    cache:    DrawCache,
    events:   Option<EventLogger>,
}

impl AppState {
    pub fn new(cache: DrawCache) -> Self {
        Self { fetchers: HashMap::new(), cache, events: None }
    }

    pub fn with_fetcher(mut self, fetcher: DrawFetcher) -> Self {
        self.fetchers.insert(fetcher.game().slug, fetcher);
        self
    }

    pub fn with_event_log(mut self, logger: EventLogger) -> Self {
        self.events = Some(logger);
        self
    }

    fn fetcher(&self, slug: &str) -> Result<&DrawFetcher, ApiError> {
        Game::from_slug(slug)
            .and_then(|game| self.fetchers.get(game.slug))
            .ok_or_else(|| ApiError::NotFound(format!("Loteria '{}' não suportada", slug)))
    }

    /// Cache hit, jinak fallback řetěz providerů.
    async fn latest_draw(&self, fetcher: &DrawFetcher) -> Result<DrawResult, ApiError> {
        let slug = fetcher.game().slug;
        if let Some(draw) = self.cache.get(slug).await {
            return Ok(draw);
        }

        let draw = fetcher.fetch_latest().await?;
        self.cache.put(slug, draw.clone()).await;
        Ok(draw)
    }

    fn cache_control(&self) -> String {
        let secs = self.cache.ttl().as_secs();
        if secs == 0 {
            "no-store".to_string()
        } else {
            format!("public, max-age={secs}")
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/{game}", get(draw_handler))
        .route("/api/{game}/check", post(check_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/{game}
async fn draw_handler(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let fetcher = state.fetcher(&game)?;
    let draw = state.latest_draw(fetcher).await?;
    Ok(([(header::CACHE_CONTROL, state.cache_control())], Json(draw)))
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub sorteio:    DrawResult,
    pub resumo:     CheckSummary,
    pub resultados: Vec<BetOutcome>,
}

/// POST /api/{game}/check
async fn check_handler(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let fetcher = state.fetcher(&game)?;
    let game = *fetcher.game();

    let bets = parse_bets(&game, &body);
    let draw = state.latest_draw(fetcher).await?;
    let drawn = draw
        .drawn(&game)
        .map_err(|e| ApiError::Internal(format!("invalid cached draw: {e}")))?;

    let resultados = score_all(&bets, &drawn);
    let resumo = CheckSummary::from_outcomes(&resultados);

    info!(
        game = game.slug,
        contest = ?draw.contest_number,
        "Bolão checked: {} bets, sena={} quina={} quadra={}",
        resumo.valid_bets, resumo.top_prize, resumo.second_tier, resumo.third_tier
    );
    if let Some(events) = &state.events {
        events.log_quiet(&BolaoCheckedEvent {
            ts:          now_iso(),
            event:       "BOLAO_CHECKED",
            game:        game.slug.to_string(),
            contest:     draw.contest_number,
            valid_bets:  resumo.valid_bets,
            top_prize:   resumo.top_prize,
            second_tier: resumo.second_tier,
            third_tier:  resumo.third_tier,
        });
    }

    Ok(Json(CheckResponse { sorteio: draw, resumo, resultados }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Upstream(String),
    Internal(String),
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::AllProvidersFailed { .. } => ApiError::Upstream(e.to_string()),
            FetchError::Decode { .. } | FetchError::Internal(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse { error: msg, details: None }),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, ErrorResponse { error: msg, details: None }),
            ApiError::Internal(details) => {
                warn!("Internal error: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Erro ao consultar resultado".to_string(),
                        details: Some(details),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
