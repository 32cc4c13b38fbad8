use std::cmp::Ordering;

use fixed::types::U16F16;

use crate::error::{GameError, GameResult};
use crate::model::{Difficulty, GuessOutcome, HintRange};

const BASE_SCORE: u32 = 1000;
const ATTEMPT_PENALTY: i64 = 50;
const HINT_PENALTY: i64 = 100;
const TIME_PENALTY: i64 = 10;
const TIME_PENALTY_INTERVAL_SECS: u64 = 5;

const MIN_HINT_HALF_WIDTH: i64 = 10;
const HINT_EDGE_DISTANCE: i64 = 3;
const HINT_EDGE_PADDING: i64 = 5;

/// Parses raw input as a guess within `[min, max]`.
pub fn parse_guess(raw: &str, min: i64, max: i64) -> GameResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) if (min..=max).contains(&value) => Ok(value),
        _ => Err(GameError::InvalidGuess { min, max }),
    }
}

pub fn classify(guess: i64, target: i64) -> GuessOutcome {
    match guess.cmp(&target) {
        Ordering::Equal => GuessOutcome::Equal,
        Ordering::Less => GuessOutcome::TooLow,
        Ordering::Greater => GuessOutcome::TooHigh,
    }
}

/// Narrowed interval around `target`. Depends only on its inputs, so repeated
/// hints in a round reveal the same interval.
pub fn hint_range(target: i64, min: i64, max: i64) -> HintRange {
    let half_width = ((max - min) / 4).max(MIN_HINT_HALF_WIDTH);
    let mut lo = min.max(target - half_width);
    let mut hi = max.min(target + half_width);

    if target - lo < HINT_EDGE_DISTANCE {
        lo = min.max(target - HINT_EDGE_PADDING);
    }
    if hi - target < HINT_EDGE_DISTANCE {
        hi = max.min(target + HINT_EDGE_PADDING);
    }

    HintRange { lo, hi }
}

pub fn base_score(difficulty: Difficulty) -> i64 {
    let base = U16F16::from_num(BASE_SCORE) * difficulty.score_multiplier();
    base.to_num::<i64>()
}

pub fn compute_score(
    attempts: u32,
    hints: u32,
    elapsed_seconds: u64,
    difficulty: Difficulty,
) -> u32 {
    let time_steps =
        i64::try_from(elapsed_seconds / TIME_PENALTY_INTERVAL_SECS).unwrap_or(i64::MAX);
    let score = base_score(difficulty)
        .saturating_sub(ATTEMPT_PENALTY * i64::from(attempts))
        .saturating_sub(HINT_PENALTY * i64::from(hints))
        .saturating_sub(TIME_PENALTY.saturating_mul(time_steps));

    u32::try_from(score.max(0)).unwrap_or(u32::MAX)
}

/// Closeness of `guess` to `target` on a 0-100 scale (100 is a hit).
pub fn proximity(guess: i64, target: i64, min: i64, max: i64) -> f64 {
    let span = (max - min) as f64;
    if span <= 0.0 {
        return 100.0;
    }
    let distance = (target - guess).abs() as f64;
    100.0 - distance / span * 100.0
}
