mod difficulty;
mod game_engine_command;
mod game_engine_event;
mod guess;
mod leaderboard_entry;
mod timer_state;

pub use difficulty::Difficulty;
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::{GameEngineEvent, Message, Severity, WinSummary};
pub use guess::{GameMode, GuessOutcome, HintRange, HistoryItem};
pub use leaderboard_entry::{player_name_or_default, LeaderboardEntry, Standings, ANONYMOUS};
pub use timer_state::{format_mm_ss, TimerState};
