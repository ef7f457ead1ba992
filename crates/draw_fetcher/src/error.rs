//! Error types for the draw fetcher.

use bet_scorer::ScoreError;
use thiserror::Error;

/// Why a single provider attempt was discarded. Always absorbed by the fallback chain.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("timeout")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unusable draw: {0}")]
    Unusable(#[from] ScoreError),
}

impl From<reqwest::Error> for AttemptError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AttemptError::Timeout
        } else {
            AttemptError::Transport(e)
        }
    }
}

impl AttemptError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AttemptError::Status(s) => Some(s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct FailedAttempt {
    pub provider: String,
    pub error:    AttemptError,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Falha ao consultar resultado: {}", describe(.attempts))]
    AllProvidersFailed { attempts: Vec<FailedAttempt> },

    /// Provider answered 2xx, but the body is not JSON. Ends the fetch.
    #[error("{provider} returned a body that is not JSON: {source}")]
    Decode {
        provider: String,
        source:   serde_json::Error,
    },

    #[error("HTTP client error: {0}")]
    Internal(#[from] reqwest::Error),
}

impl FetchError {
    pub fn attempted_providers(&self) -> Vec<String> {
        match self {
            FetchError::AllProvidersFailed { attempts } => {
                attempts.iter().map(|a| a.provider.clone()).collect()
            }
            FetchError::Decode { provider, .. } => vec![provider.clone()],
            FetchError::Internal(_) => Vec::new(),
        }
    }
}

fn describe(attempts: &[FailedAttempt]) -> String {
    if attempts.is_empty() {
        return "nenhum provedor configurado".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{} ({})", a.provider, a.error))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, FetchError>;
