//! Stav jednoho front-endu (vstupní text, poslední sorteio, loading, chyba).
//! Jediný vlastník, explicitní settery; nová kontrola přepíše předchozí výsledek.

use bet_scorer::{parse_bets, score_all, Bet, BetOutcome, CheckSummary, Game};
use draw_fetcher::{DrawFetcher, DrawResult};
use tracing::warn;

/// Vzorový bolão, použije se když uživatel nic nevloží.
pub const SAMPLE_POOL: &str = "\
02 05 10 17 21 28 33 36 43 53
02 19 32 40 42 53 55
05 10 27 48 52 56 57
05 21 25 28 30 34 43
04 07 19 35 46 53 60
14 25 40 41 42 50 51
05 06 12 13 14 58
07 16 36 39 45 54
01 08 27 41 51 55
01 31 33 34 50 60
05 10 13 39 47 54
02 11 12 21 28 39
03 16 29 37 38 52
02 04 13 24 33 59
15 22 35 37 55 56
06 33 37 43 58 60
01 03 04 11 13 35
07 11 42 47 57 59
27 29 41 49 57 58
05 12 20 26 29 45
15 21 39 48 56 58
06 32 35 47 50 58
02 05 28 29 36 44
08 20 23 36 37 50
01 07 39 50 54 58
09 12 13 19 26 36";

#[derive(Debug, Clone)]
pub struct CheckSession {
    game:       Game,
    input_text: String,
    last_draw:  Option<DrawResult>,
    loading:    bool,
    error:      Option<String>,
}

impl CheckSession {
    pub fn new(game: Game, input_text: impl Into<String>) -> Self {
        Self {
            game,
            input_text: input_text.into(),
            last_draw: None,
            loading: false,
            error: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn last_draw(&self) -> Option<&DrawResult> {
        self.last_draw.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Nastaví loading. `false` = kontrola už běží, nic se nespouští.
    pub fn begin_check(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Uloží výsledek kontroly. Při chybě se předchozí sorteio zahodí,
    /// aby se výsledky nepočítaly proti starému losování.
    pub fn finish_check(&mut self, outcome: Result<DrawResult, String>) {
        match outcome {
            Ok(draw) => {
                self.last_draw = Some(draw);
                self.error = None;
            }
            Err(msg) => {
                self.last_draw = None;
                self.error = Some(msg);
            }
        }
        self.loading = false;
    }

    /// Jeden cyklus "Verificar resultado": begin -> fetch -> finish.
    pub async fn run_check(&mut self, fetcher: &DrawFetcher) {
        if !self.begin_check() {
            warn!("Check already in flight, ignoring trigger");
            return;
        }
        let outcome = fetcher.fetch_latest().await.map_err(|e| e.to_string());
        self.finish_check(outcome);
    }

    pub fn bets(&self) -> Vec<Bet> {
        parse_bets(&self.game, &self.input_text)
    }

    /// Prázdné, dokud nemáme použitelné sorteio.
    pub fn outcomes(&self) -> Vec<BetOutcome> {
        let Some(draw) = &self.last_draw else {
            return Vec::new();
        };
        match draw.drawn(&self.game) {
            Ok(drawn) => score_all(&self.bets(), &drawn),
            Err(e) => {
                warn!("Stored draw is not scorable: {e}");
                Vec::new()
            }
        }
    }

    pub fn summary(&self) -> CheckSummary {
        let outcomes = self.outcomes();
        CheckSummary {
            valid_bets: self.bets().len(),
            ..CheckSummary::from_outcomes(&outcomes)
        }
    }
}
