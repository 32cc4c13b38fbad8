use fixed::types::U16F16;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// Resolves a difficulty name. Unknown names fall back to medium for both
    /// the range table and the score multiplier.
    pub fn from_name(name: &str) -> Difficulty {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => {
                warn!(target: "difficulty", "Unknown difficulty {:?}, using medium", other);
                Difficulty::Medium
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Inclusive (min, max) range of the target number.
    pub fn range(&self) -> (i64, i64) {
        match self {
            Difficulty::Easy => (1, 50),
            Difficulty::Medium => (1, 100),
            Difficulty::Hard => (1, 200),
        }
    }

    pub fn score_multiplier(&self) -> U16F16 {
        match self {
            Difficulty::Easy => U16F16::from_num(1),
            Difficulty::Medium => U16F16::from_num(1.5),
            Difficulty::Hard => U16F16::from_num(2),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Difficulty {
    fn from(name: String) -> Self {
        Difficulty::from_name(&name)
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.name().to_string()
    }
}
