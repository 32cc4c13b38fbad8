use chrono::Local;
use log::{error, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

use super::leaderboard::{Leaderboard, DISPLAYED_ENTRIES};
use super::round::Round;
use crate::destroyable::Destroyable;
use crate::error::GameError;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    Difficulty, GameEngineCommand, GameEngineEvent, GameMode, GuessOutcome, HistoryItem,
    LeaderboardEntry, Message, Severity, WinSummary,
};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    /// Publishes the target on every round start.
    pub debug_mode: bool,
}

/// Owns the current round and the leaderboard. Commands come in through
/// [`GameEngine::handle_command`]; everything the view needs goes out as
/// [`GameEngineEvent`]s.
pub struct GameEngine {
    round: Round,
    mode: GameMode,
    rng: StdRng,
    leaderboard: Leaderboard,
    pending_result: Option<WinSummary>,
    debug_mode: bool,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
    subscription_id: Option<Unsubscriber<GameEngineCommand>>,
}

impl Destroyable for GameEngine {
    fn destroy(&mut self) {
        if let Some(subscription_id) = self.subscription_id.take() {
            subscription_id.unsubscribe();
        }
    }
}

impl GameEngine {
    pub fn new(
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
        leaderboard: Leaderboard,
        config: EngineConfig,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().next_u64());
        trace!(target: "game_engine", "Engine seed: {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        // replaced by the first NewRound; never shown
        let round = Round::new(config.mode, config.difficulty, &mut rng);
        Self {
            round,
            mode: config.mode,
            rng,
            leaderboard,
            pending_result: None,
            debug_mode: config.debug_mode,
            game_engine_event_emitter,
            subscription_id: None,
        }
    }

    /// Moves the engine behind `Rc<RefCell<_>>` and feeds it every command
    /// published on `command_observer`.
    pub fn wire(self, command_observer: EventObserver<GameEngineCommand>) -> Rc<RefCell<Self>> {
        let engine = Rc::new(RefCell::new(self));
        let handler = Rc::clone(&engine);
        let subscription_id =
            command_observer.subscribe(move |command| match handler.try_borrow_mut() {
                Ok(mut engine) => engine.handle_command(command.clone()),
                Err(_) => {
                    error!(target: "game_engine", "Engine busy, dropped command {:?}", command)
                }
            });
        engine.borrow_mut().subscription_id = Some(subscription_id);
        engine
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn pending_result(&self) -> Option<&WinSummary> {
        self.pending_result.as_ref()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::NewRound(difficulty) => {
                self.start_round(difficulty.unwrap_or(self.round.difficulty))
            }
            GameEngineCommand::SubmitGuess(raw) => self.submit_guess(&raw),
            GameEngineCommand::RequestHint => self.request_hint(),
            GameEngineCommand::Tick(round_id) => self.tick(round_id),
            GameEngineCommand::SaveScore(name) => self.save_score(&name),
            GameEngineCommand::PlayAgain => {
                self.pending_result = None;
                self.start_round(self.round.difficulty);
            }
            GameEngineCommand::ShowStandings => self.emit_standings(),
        }
    }

    fn start_round(&mut self, difficulty: Difficulty) {
        let round = Round::new(self.mode, difficulty, &mut self.rng);
        self.start_prepared_round(round);
    }

    /// Replaces the current round with `round` and announces it.
    pub fn start_prepared_round(&mut self, round: Round) {
        self.round = round;
        self.mode = self.round.mode;
        self.pending_result = None;

        let round = &self.round;
        self.emit(GameEngineEvent::RoundStarted {
            round_id: round.id,
            mode: round.mode,
            difficulty: round.difficulty,
            min_range: round.min_range,
            max_range: round.max_range,
            timed: round.has_timer(),
        });
        if self.debug_mode {
            self.emit(GameEngineEvent::TargetRevealed(self.round.target));
        }
        self.emit_counters();
        self.emit(GameEngineEvent::ProximityChanged(0.0));
        if self.round.has_timer() {
            self.emit(GameEngineEvent::TimerChanged(self.round.elapsed_label()));
        }
        self.emit_message(
            format!(
                "Enter a number between {} and {} and submit your guess.",
                self.round.min_range, self.round.max_range
            ),
            Severity::Info,
        );
    }

    fn submit_guess(&mut self, raw: &str) {
        if self.round.is_over && self.round.mode == GameMode::Classic {
            // classic: submitting on a finished round means "play again"
            self.start_round(self.round.difficulty);
            return;
        }

        let outcome = match self.round.submit_guess(raw) {
            Ok(Some(outcome)) => outcome,
            Ok(None) => {
                trace!(target: "game_engine", "Round over, ignoring guess {:?}", raw);
                return;
            }
            Err(err) => {
                self.emit_message(err.to_string(), Severity::Error);
                return;
            }
        };

        self.emit_counters();
        if let Some(item) = self.round.history.last().copied() {
            self.emit(GameEngineEvent::HistoryAppended(item));
            if let (HistoryItem::Guess { value, .. }, GameMode::Advanced) =
                (item, self.round.mode)
            {
                self.emit(GameEngineEvent::ProximityChanged(self.round.proximity(value)));
            }
        }

        match outcome {
            GuessOutcome::Equal => self.handle_correct_guess(),
            GuessOutcome::TooLow => {
                self.emit_message("Too low! Try a higher number.", Severity::Hint)
            }
            GuessOutcome::TooHigh => {
                self.emit_message("Too high! Try a lower number.", Severity::Hint)
            }
        }
    }

    fn handle_correct_guess(&mut self) {
        let round = &self.round;
        let score = match round.mode {
            GameMode::Advanced => Some(round.score()),
            GameMode::Classic => None,
        };
        let summary = WinSummary {
            target: round.target,
            attempts: round.attempts,
            hints_used: round.hints_used,
            difficulty: round.difficulty,
            elapsed: round.elapsed_label(),
            elapsed_seconds: round.elapsed_seconds(),
            score,
        };
        let text = match round.mode {
            GameMode::Advanced => format!(
                "Congratulations! You guessed the number {} in {} attempts!",
                round.target, round.attempts
            ),
            GameMode::Classic => format!(
                "Congratulations! You guessed the number in {} attempts!",
                round.attempts
            ),
        };
        let round_id = round.id;

        if self.round.has_timer() {
            self.emit(GameEngineEvent::TimerChanged(summary.elapsed.clone()));
            self.pending_result = Some(summary.clone());
        }
        self.emit_message(text, Severity::Success);
        self.emit(GameEngineEvent::RoundWon { round_id, summary });
    }

    fn request_hint(&mut self) {
        match self.round.request_hint() {
            Ok(Some(hint)) => {
                self.emit_counters();
                self.emit(GameEngineEvent::HistoryAppended(HistoryItem::Hint(hint)));
                self.emit_message(
                    format!("Hint: The number is between {} and {}", hint.lo, hint.hi),
                    Severity::Hint,
                );
            }
            Ok(None) => trace!(target: "game_engine", "Round over, ignoring hint request"),
            Err(err) => self.emit_message(err.to_string(), Severity::Error),
        }
    }

    fn tick(&mut self, round_id: uuid::Uuid) {
        if round_id != self.round.id {
            trace!(target: "game_engine", "Dropping tick for stale round {}", round_id);
            return;
        }
        if self.round.has_timer() && self.round.timer_state.is_running() {
            self.emit(GameEngineEvent::TimerChanged(self.round.elapsed_label()));
        }
    }

    fn save_score(&mut self, name: &str) {
        let Some(summary) = self.pending_result.take() else {
            self.emit_message(GameError::NothingToSave.to_string(), Severity::Error);
            return;
        };

        let entry = LeaderboardEntry::new(
            name,
            summary.score.unwrap_or(0),
            summary.attempts,
            summary.elapsed.clone(),
            summary.difficulty,
            Local::now().format("%Y-%m-%d").to_string(),
        );
        match self.leaderboard.record_score(entry) {
            Ok(_) => {
                self.emit_standings();
                self.start_round(summary.difficulty);
            }
            Err(err) => {
                error!(target: "game_engine", "Failed to save score: {}", err);
                self.pending_result = Some(summary);
                self.emit_message(format!("Could not save score: {}", err), Severity::Error);
            }
        }
    }

    fn emit_standings(&self) {
        self.emit(GameEngineEvent::StandingsChanged(
            self.leaderboard.top_entries(DISPLAYED_ENTRIES),
        ));
    }

    fn emit_counters(&self) {
        self.emit(GameEngineEvent::CountersChanged {
            attempts: self.round.attempts,
            hints_used: self.round.hints_used,
        });
    }

    fn emit_message(&self, text: impl Into<String>, severity: Severity) {
        self.emit(GameEngineEvent::MessageChanged(Message::new(text, severity)));
    }

    fn emit(&self, event: GameEngineEvent) {
        self.game_engine_event_emitter.emit(event);
    }
}
