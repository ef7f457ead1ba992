use crate::game::Game;
use crate::parse::Bet;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("expected {expected} drawn numbers, got {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("invalid drawn number: {0:?}")]
    InvalidNumber(String),

    #[error("drawn number repeated: {0}")]
    Duplicate(String),
}

/// Validated result of one draw: exactly `game.drawn_count` distinct canonical numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DrawnNumbers(Vec<String>);

impl DrawnNumbers {
    pub fn new(game: &Game, numbers: &[String]) -> Result<Self, ScoreError> {
        if numbers.len() != game.drawn_count {
            return Err(ScoreError::WrongCount { expected: game.drawn_count, found: numbers.len() });
        }
        for (i, n) in numbers.iter().enumerate() {
            if !game.is_valid_number(n) {
                return Err(ScoreError::InvalidNumber(n.clone()));
            }
            if numbers[..i].contains(n) {
                return Err(ScoreError::Duplicate(n.clone()));
            }
        }
        Ok(Self(numbers.to_vec()))
    }

    pub fn numbers(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, number: &str) -> bool {
        self.0.iter().any(|n| n == number)
    }
}

/// Výherní kategorie. Pořadí variant = priorita vyhodnocení.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    TopPrize,
    SecondTier,
    ThirdTier,
    None,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::TopPrize   => "SENA",
            Tier::SecondTier => "Quina",
            Tier::ThirdTier  => "Quadra",
            Tier::None       => "Nada",
        }
    }

    pub fn is_winning(&self) -> bool {
        !matches!(self, Tier::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetOutcome {
    pub bet_index:   usize,   // 1-based, pořadí platných řádků
    pub numbers:     Bet,
    pub hit_count:   usize,
    pub hit_numbers: Vec<String>,
    pub tier:        Tier,
}

/// Scores one bet. A bet wins the top prize when every drawn number is in it,
/// which for bets with more than 6 numbers means at least one winning
/// 6-number combination.
pub fn score_bet(bet_index: usize, bet: &Bet, drawn: &DrawnNumbers) -> BetOutcome {
    let hit_numbers: Vec<String> = bet
        .numbers()
        .iter()
        .filter(|n| drawn.contains(n))
        .cloned()
        .collect();
    let hit_count = hit_numbers.len();

    let is_top_prize = drawn.numbers().iter().all(|d| bet.contains(d));

    let tier = if is_top_prize {
        Tier::TopPrize
    } else if hit_count >= 5 {
        Tier::SecondTier
    } else if hit_count >= 4 {
        Tier::ThirdTier
    } else {
        Tier::None
    };

    BetOutcome {
        bet_index,
        numbers: bet.clone(),
        hit_count,
        hit_numbers,
        tier,
    }
}

pub fn score_all(bets: &[Bet], drawn: &DrawnNumbers) -> Vec<BetOutcome> {
    bets.iter()
        .enumerate()
        .map(|(i, bet)| score_bet(i + 1, bet, drawn))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub valid_bets:  usize,
    pub top_prize:   usize,
    pub second_tier: usize,
    pub third_tier:  usize,
}

impl CheckSummary {
    pub fn from_outcomes(outcomes: &[BetOutcome]) -> Self {
        let count = |tier: Tier| outcomes.iter().filter(|o| o.tier == tier).count();
        Self {
            valid_bets:  outcomes.len(),
            top_prize:   count(Tier::TopPrize),
            second_tier: count(Tier::SecondTier),
            third_tier:  count(Tier::ThirdTier),
        }
    }

    pub fn winners(&self) -> usize {
        self.top_prize + self.second_tier + self.third_tier
    }
}
