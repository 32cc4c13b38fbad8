use crate::model::Difficulty;
use serde::{Deserialize, Serialize};

pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub attempts: u32,
    /// `mm:ss`
    #[serde(rename = "time")]
    pub elapsed: String,
    pub difficulty: Difficulty,
    pub date: String,
}

impl LeaderboardEntry {
    pub fn new(
        name: &str,
        score: u32,
        attempts: u32,
        elapsed: String,
        difficulty: Difficulty,
        date: String,
    ) -> Self {
        Self {
            name: player_name_or_default(name),
            score,
            attempts,
            elapsed,
            difficulty,
            date,
        }
    }
}

pub fn player_name_or_default(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS.to_string()
    } else {
        trimmed.to_string()
    }
}

/// What the high-score panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Standings {
    NoScoresYet,
    Ranked(Vec<LeaderboardEntry>),
}
