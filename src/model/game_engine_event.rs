use uuid::Uuid;

use super::{Difficulty, GameMode, HistoryItem, Standings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    Hint,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Contents of the win screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinSummary {
    pub target: i64,
    pub attempts: u32,
    pub hints_used: u32,
    pub difficulty: Difficulty,
    pub elapsed: String,
    pub elapsed_seconds: u64,
    /// `None` in classic mode.
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEngineEvent {
    RoundStarted {
        round_id: Uuid,
        mode: GameMode,
        difficulty: Difficulty,
        min_range: i64,
        max_range: i64,
        timed: bool,
    },
    /// Only published in debug mode.
    TargetRevealed(i64),
    CountersChanged {
        attempts: u32,
        hints_used: u32,
    },
    MessageChanged(Message),
    HistoryAppended(HistoryItem),
    /// 0-100, where 100 is the target itself.
    ProximityChanged(f64),
    TimerChanged(String),
    RoundWon {
        round_id: Uuid,
        summary: WinSummary,
    },
    StandingsChanged(Standings),
}
