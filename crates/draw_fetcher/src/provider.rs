//! Provider configs and the per-provider JSON normalizers.
//!
//! BrasilAPI:  { "concurso": 2750, "data": "24/06/2024", "dezenas": ["05", ...] }
//! Caixa:      { "numero": 2750, "dataApuracao": "24/06/2024", "listaDezenas": ["05", ...] }

use crate::DrawResult;
use bet_scorer::Game;
use serde_json::Value;

pub const BRASILAPI_URL: &str = "https://brasilapi.com.br/api/loterias/v1/megasena";
pub const CAIXA_URL: &str = "https://servicebus2.caixa.gov.br/portaldeloterias/api/megasena";

/// Tvar odpovědi, podle kterého se vybírá normalizace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderShape {
    BrasilApi,
    Caixa,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name:  String,
    pub url:   String,
    pub shape: ProviderShape,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>, shape: ProviderShape) -> Self {
        Self { name: name.into(), url: url.into(), shape }
    }

    pub fn brasilapi(url: impl Into<String>) -> Self {
        Self::new("BrasilAPI", url, ProviderShape::BrasilApi)
    }

    pub fn caixa(url: impl Into<String>) -> Self {
        Self::new("Caixa", url, ProviderShape::Caixa)
    }

    pub fn normalize(&self, game: &Game, raw: &Value) -> DrawResult {
        match self.shape {
            ProviderShape::BrasilApi => normalize_brasilapi(game, raw, &self.name),
            ProviderShape::Caixa     => normalize_caixa(game, raw, &self.name),
        }
    }
}

/// Default priority order: BrasilAPI first, Caixa as fallback.
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::brasilapi(BRASILAPI_URL),
        ProviderConfig::caixa(CAIXA_URL),
    ]
}

fn normalize_brasilapi(game: &Game, raw: &Value, source: &str) -> DrawResult {
    DrawResult {
        contest_number: as_u32(&raw["concurso"]),
        draw_date:      as_string(&raw["data"]),
        drawn_numbers:  as_numbers(game, &raw["dezenas"]),
        source_name:    source.to_string(),
    }
}

fn normalize_caixa(game: &Game, raw: &Value, source: &str) -> DrawResult {
    // listaDezenas je seřazený seznam; pořadí tažení jen jako záloha
    let numbers = match raw.get("listaDezenas") {
        Some(list) if list.is_array() => list,
        _ => &raw["dezenasSorteadasOrdemSorteio"],
    };

    DrawResult {
        contest_number: as_u32(&raw["numero"]),
        draw_date:      as_string(&raw["dataApuracao"]),
        drawn_numbers:  as_numbers(game, numbers),
        source_name:    source.to_string(),
    }
}

fn as_u32(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Čísla mohou přijít jako "05", "5" nebo 5. Neplatné položky se zahodí,
/// takže poškozený seznam neprojde kontrolou počtu.
fn as_numbers(game: &Game, v: &Value) -> Vec<String> {
    let Some(items) = v.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => game.normalize_number(s),
            Value::Number(n) => game.normalize_number(&n.to_string()),
            _ => None,
        })
        .collect()
}
