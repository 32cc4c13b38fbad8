pub mod game_engine;
pub mod leaderboard;
pub mod round;
pub mod rules;
pub mod settings;
pub mod ticker;

pub use game_engine::{EngineConfig, GameEngine};
pub use leaderboard::{FileSlot, Leaderboard, MemorySlot, ScoreSlot};
pub use round::{Round, RoundPhase};
pub use rules::compute_score;
pub use settings::Settings;
pub use ticker::Ticker;
