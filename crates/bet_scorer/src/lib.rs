//! Bolão - Bet Scorer
//!
//! Turns pasted bet text into normalized bet rows and scores each row
//! against the drawn numbers of a single contest.
//!
//!   - game.rs:  game descriptor (number range, drawn count) + number normalization
//!   - parse.rs: freeform text -> Vec<Bet>
//!   - score.rs: Bet x DrawnNumbers -> BetOutcome, tier counters

pub mod game;
pub mod parse;
pub mod score;

pub use game::{Game, MEGA_SENA};
pub use parse::{parse_bets, Bet};
pub use score::{score_all, score_bet, BetOutcome, CheckSummary, DrawnNumbers, ScoreError, Tier};
