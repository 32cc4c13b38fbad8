use uuid::Uuid;

use super::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEngineCommand {
    /// Start a fresh round; `None` keeps the current difficulty.
    NewRound(Option<Difficulty>),
    SubmitGuess(String),
    RequestHint,
    /// Periodic timer tick for the round with this id.
    Tick(Uuid),
    SaveScore(String),
    PlayAgain,
    ShowStandings,
}
