use crate::game::Game;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// Oddělovače čísel v řádku: whitespace, čárka, středník (libovolně opakované)
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s;]+").expect("separator regex"));

/// Jedna sázka = jeden řádek vstupu, unikátní dvoumístná čísla v pořadí zadání.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bet(Vec<String>);

impl Bet {
    pub fn numbers(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, number: &str) -> bool {
        self.0.iter().any(|n| n == number)
    }

    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

/// Parses one pasted line. Invalid tokens are skipped, duplicates collapsed
/// keeping first occurrence; `None` when fewer than `game.min_bet_size()` remain.
pub fn parse_line(game: &Game, line: &str) -> Option<Bet> {
    let mut numbers: Vec<String> = Vec::new();
    for token in SEPARATORS.split(line.trim()) {
        if let Some(n) = game.normalize_number(token) {
            if !numbers.contains(&n) {
                numbers.push(n);
            }
        }
    }

    (numbers.len() >= game.min_bet_size()).then_some(Bet(numbers))
}

/// Parses freeform multi-line text into bets, preserving line order.
/// Lines that do not yield a full bet are paste noise and are dropped silently.
pub fn parse_bets(game: &Game, text: &str) -> Vec<Bet> {
    text.lines().filter_map(|line| parse_line(game, line)).collect()
}
