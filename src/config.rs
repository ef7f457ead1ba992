//! Konfigurace z env (po `dotenv().ok()`), vše má rozumný default.
//!
//!   BOLAO_BIND                 0.0.0.0:3000
//!   BOLAO_FETCH_TIMEOUT_SECS   6
//!   BOLAO_CACHE_SECS           60
//!   BOLAO_LOG_DIR              logs
//!   BRASILAPI_URL              https://brasilapi.com.br/api/loterias/v1/megasena
//!   CAIXA_URL                  https://servicebus2.caixa.gov.br/portaldeloterias/api/megasena

use anyhow::{Context, Result};
use draw_fetcher::{ProviderConfig, BRASILAPI_URL, CAIXA_URL};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind:          SocketAddr,
    pub fetch_timeout: Duration,
    pub cache_ttl:     Duration,
    pub log_dir:       PathBuf,
    pub providers:     Vec<ProviderConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("BOLAO_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind: SocketAddr = bind.parse().context("Invalid BOLAO_BIND")?;

        let secs = |key: &str, default: u64| -> u64 {
            match lookup(key) {
                None => default,
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    warn!("{key}={raw:?} is not a number, using {default}");
                    default
                }),
            }
        };

        let brasilapi = lookup("BRASILAPI_URL").unwrap_or_else(|| BRASILAPI_URL.to_string());
        let caixa = lookup("CAIXA_URL").unwrap_or_else(|| CAIXA_URL.to_string());

        Ok(Self {
            bind,
            fetch_timeout: Duration::from_secs(secs("BOLAO_FETCH_TIMEOUT_SECS", 6).max(1)),
            cache_ttl:     Duration::from_secs(secs("BOLAO_CACHE_SECS", 60)),
            log_dir:       lookup("BOLAO_LOG_DIR").unwrap_or_else(|| "logs".to_string()).into(),
            providers:     vec![
                ProviderConfig::brasilapi(brasilapi),
                ProviderConfig::caixa(caixa),
            ],
        })
    }
}
