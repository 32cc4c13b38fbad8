use crate::model::{Difficulty, GameEngineCommand};

/// What one line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Engine(GameEngineCommand),
    ShowTime,
    Help,
    Quit,
}

/// Turns prompt lines into input events. Anything not recognised as a
/// command is submitted as a guess, so the engine gets to reject it.
#[derive(Debug, Default)]
pub struct InputTranslator {
    default_name: Option<String>,
}

impl InputTranslator {
    pub fn new(default_name: Option<String>) -> Self {
        Self { default_name }
    }

    pub fn set_default_name(&mut self, name: Option<String>) {
        self.default_name = name;
    }

    pub fn translate(&self, line: &str) -> InputEvent {
        let trimmed = line.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "hint" | "h" => InputEvent::Engine(GameEngineCommand::RequestHint),
            "new" | "n" => {
                let difficulty = (!rest.is_empty()).then(|| Difficulty::from_name(rest));
                InputEvent::Engine(GameEngineCommand::NewRound(difficulty))
            }
            "easy" | "medium" | "hard" => {
                InputEvent::Engine(GameEngineCommand::NewRound(Some(Difficulty::from_name(word))))
            }
            "save" => {
                let name = if rest.is_empty() {
                    self.default_name.clone().unwrap_or_default()
                } else {
                    rest.to_string()
                };
                InputEvent::Engine(GameEngineCommand::SaveScore(name))
            }
            "again" | "play" => InputEvent::Engine(GameEngineCommand::PlayAgain),
            "scores" => InputEvent::Engine(GameEngineCommand::ShowStandings),
            "time" | "t" => InputEvent::ShowTime,
            "help" | "?" => InputEvent::Help,
            "quit" | "exit" | "q" => InputEvent::Quit,
            _ => InputEvent::Engine(GameEngineCommand::SubmitGuess(trimmed.to_string())),
        }
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  <number>         submit a guess
  hint             narrow down the range (costs points)
  new [difficulty] start a new round (easy, medium, hard)
  save [name]      record the last win on the leaderboard
  again            start a new round without saving
  scores           show the high scores
  time             show the elapsed time
  quit             leave the game";
