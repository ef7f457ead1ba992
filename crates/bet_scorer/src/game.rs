use serde::Serialize;

/// Popis loterie: rozsah čísel a počet tažených dezen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Game {
    pub slug:        &'static str,
    pub name:        &'static str,
    pub min_number:  u32,
    pub max_number:  u32,
    pub drawn_count: usize,
}

pub const MEGA_SENA: Game = Game {
    slug:        "megasena",
    name:        "Mega-Sena",
    min_number:  1,
    max_number:  60,
    drawn_count: 6,
};

const GAMES: &[Game] = &[MEGA_SENA];

impl Game {
    pub fn from_slug(slug: &str) -> Option<Game> {
        GAMES.iter().copied().find(|g| g.slug.eq_ignore_ascii_case(slug))
    }

    /// Smallest bet that can be scored: one number per drawn ball.
    pub fn min_bet_size(&self) -> usize {
        self.drawn_count
    }

    /// Parses one token into the zero-padded two-digit form ("5" -> "05").
    /// Non-integers and out-of-range values yield `None`; decimal or exponent
    /// forms like "5.0" and "1e1" count as non-integers.
    pub fn normalize_number(&self, token: &str) -> Option<String> {
        let n: u32 = token.trim().parse().ok()?;
        if n < self.min_number || n > self.max_number {
            return None;
        }
        Some(format!("{n:02}"))
    }

    pub fn is_valid_number(&self, value: &str) -> bool {
        self.normalize_number(value).as_deref() == Some(value)
    }
}
