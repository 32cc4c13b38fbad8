use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Equal,
    TooLow,
    TooHigh,
}

/// Inclusive interval revealed by a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRange {
    pub lo: i64,
    pub hi: i64,
}

impl HintRange {
    pub fn contains(&self, value: i64) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn width(&self) -> i64 {
        self.hi - self.lo
    }
}

/// One line of the per-round history shown next to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryItem {
    Guess { value: i64, outcome: GuessOutcome },
    Hint(HintRange),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Fixed 1-100 range, no hints, no timer, no score.
    Classic,
    #[default]
    Advanced,
}
