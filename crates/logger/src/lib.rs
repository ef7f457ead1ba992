//! Bolão - Logger
//! JSONL event stream, one file per UTC day

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Cannot create log dir {}: {}", dir.display(), e);
        }
        Self { log_dir: dir }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Soubor pro dnešní den (UTC)
    pub fn current_file(&self) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        self.log_dir.join(format!("{date}.jsonl"))
    }

    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let path  = self.current_file();
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        writeln!(f, "{line}")?;
        Ok(())
    }

    /// Log a zapomeň; chyba zápisu jen do tracingu.
    pub fn log_quiet<T: Serialize>(&self, event: &T) {
        if let Err(e) = self.log(event) {
            tracing::warn!("Event log write failed: {e}");
        }
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Event typy ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone)]
pub struct ProviderAttemptEvent {
    pub ts:          String,
    pub event:       &'static str,   // "PROVIDER_ATTEMPT"
    pub game:        String,
    pub provider:    String,
    pub url:         String,
    pub ok:          bool,
    pub status_code: Option<u16>,
    pub message:     String,         // "ok" | důvod selhání
    pub elapsed_ms:  u64,
}

#[derive(Serialize, Debug, Clone)]
pub struct DrawFetchedEvent {
    pub ts:       String,
    pub event:    &'static str,      // "DRAW_FETCHED"
    pub game:     String,
    pub source:   String,
    pub contest:  Option<u32>,
    pub numbers:  Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct DrawFetchFailedEvent {
    pub ts:        String,
    pub event:     &'static str,     // "DRAW_FETCH_FAILED"
    pub game:      String,
    pub attempted: Vec<String>,
    pub message:   String,
}

#[derive(Serialize, Debug, Clone)]
pub struct BolaoCheckedEvent {
    pub ts:          String,
    pub event:       &'static str,   // "BOLAO_CHECKED"
    pub game:        String,
    pub contest:     Option<u32>,
    pub valid_bets:  usize,
    pub top_prize:   usize,
    pub second_tier: usize,
    pub third_tier:  usize,
}
