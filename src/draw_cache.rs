//! Krátké okno znovupoužití výsledku (default 60s), ať při opakovaném
//! klikání netlučeme upstream API. TTL 0 = cache vypnutá.

use draw_fetcher::DrawResult;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedDraw {
    fetched_at: Instant,
    draw:       DrawResult,
}

#[derive(Debug)]
pub struct DrawCache {
    ttl:     Duration,
    entries: RwLock<HashMap<String, CachedDraw>>,
}

impl DrawCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: RwLock::new(HashMap::new()) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, game: &str) -> Option<DrawResult> {
        if self.ttl.is_zero() {
            return None;
        }
        let entries = self.entries.read().await;
        entries
            .get(game)
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.draw.clone())
    }

    pub async fn put(&self, game: &str, draw: DrawResult) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.write().await.insert(
            game.to_string(),
            CachedDraw { fetched_at: Instant::now(), draw },
        );
    }
}
