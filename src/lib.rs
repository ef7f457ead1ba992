//! Bolão checker: porovná vložené sázky s posledním losováním Mega-Sena.
//!
//!   - config.rs:     env konfigurace
//!   - draw_cache.rs: krátké okno znovupoužití výsledku
//!   - api.rs:        axum router (GET /api/{game}, POST /api/{game}/check)
//!   - session.rs:    stav front-endu (text, sorteio, loading, chyba)
//!   - render.rs:     textová tabulka výsledků

pub mod api;
pub mod config;
pub mod draw_cache;
pub mod render;
pub mod session;

pub use api::{create_router, AppState};
pub use config::AppConfig;
pub use draw_cache::DrawCache;
pub use session::{CheckSession, SAMPLE_POOL};
