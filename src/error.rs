use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Non-numeric or out-of-range guess. Never consumes an attempt.
    #[error("Please enter a valid number between {min} and {max}.")]
    InvalidGuess { min: i64, max: i64 },

    #[error("Could not load markdown file: {0}")]
    ResourceLoad(String),

    #[error("Hints are not available in classic mode.")]
    HintsUnavailable,

    #[error("There is no finished round to save a score for.")]
    NothingToSave,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
