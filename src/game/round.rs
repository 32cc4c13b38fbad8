use log::trace;
use rand::Rng;
use std::time::SystemTime;
use uuid::Uuid;

use super::rules;
use crate::error::{GameError, GameResult};
use crate::model::{
    Difficulty, GameMode, GuessOutcome, HintRange, HistoryItem, TimerState,
};

const CLASSIC_RANGE: (i64, i64) = (1, 100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Ready,
    InProgress,
    Won,
}

/// One play-through. Fields are readable anywhere but only change through the
/// transition methods below.
#[readonly::make]
#[derive(Debug, Clone)]
pub struct Round {
    pub id: Uuid,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub target: i64,
    pub min_range: i64,
    pub max_range: i64,
    pub attempts: u32,
    pub hints_used: u32,
    pub is_over: bool,
    pub timer_state: TimerState,
    pub history: Vec<HistoryItem>,
}

impl Round {
    pub fn new<R: Rng>(mode: GameMode, difficulty: Difficulty, rng: &mut R) -> Self {
        let (min_range, max_range) = Self::bounds(mode, difficulty);
        let target = rng.random_range(min_range..=max_range);
        Self::build(mode, difficulty, target, SystemTime::now())
    }

    /// Round with a known target, `None` when it lies outside the range.
    pub fn with_target(mode: GameMode, difficulty: Difficulty, target: i64) -> Option<Self> {
        let (min_range, max_range) = Self::bounds(mode, difficulty);
        (min_range..=max_range)
            .contains(&target)
            .then(|| Self::build(mode, difficulty, target, SystemTime::now()))
    }

    fn bounds(mode: GameMode, difficulty: Difficulty) -> (i64, i64) {
        match mode {
            GameMode::Classic => CLASSIC_RANGE,
            GameMode::Advanced => difficulty.range(),
        }
    }

    fn build(mode: GameMode, difficulty: Difficulty, target: i64, now: SystemTime) -> Self {
        let (min_range, max_range) = Self::bounds(mode, difficulty);
        let round = Self {
            id: Uuid::new_v4(),
            mode,
            difficulty,
            target,
            min_range,
            max_range,
            attempts: 0,
            hints_used: 0,
            is_over: false,
            timer_state: TimerState::started_at(now),
            history: Vec::new(),
        };
        trace!(
            target: "round",
            "Round {} initialized ({:?}/{}) with target number: {}",
            round.id,
            mode,
            difficulty,
            target
        );
        round
    }

    pub fn phase(&self) -> RoundPhase {
        if self.is_over {
            RoundPhase::Won
        } else if self.attempts == 0 {
            RoundPhase::Ready
        } else {
            RoundPhase::InProgress
        }
    }

    pub fn has_timer(&self) -> bool {
        self.mode == GameMode::Advanced
    }

    /// `Ok(None)` when the round is already over.
    pub fn submit_guess(&mut self, raw: &str) -> GameResult<Option<GuessOutcome>> {
        self.submit_guess_at(raw, SystemTime::now())
    }

    pub fn submit_guess_at(
        &mut self,
        raw: &str,
        now: SystemTime,
    ) -> GameResult<Option<GuessOutcome>> {
        if self.is_over {
            return Ok(None);
        }
        let value = rules::parse_guess(raw, self.min_range, self.max_range)?;

        self.attempts += 1;
        let outcome = rules::classify(value, self.target);
        self.history.push(HistoryItem::Guess { value, outcome });

        if outcome == GuessOutcome::Equal {
            self.is_over = true;
            self.timer_state = self.timer_state.ended(now);
        }
        Ok(Some(outcome))
    }

    /// `Ok(None)` when the round is already over.
    pub fn request_hint(&mut self) -> GameResult<Option<HintRange>> {
        if self.mode == GameMode::Classic {
            return Err(GameError::HintsUnavailable);
        }
        if self.is_over {
            return Ok(None);
        }
        self.hints_used += 1;
        let hint = rules::hint_range(self.target, self.min_range, self.max_range);
        self.history.push(HistoryItem::Hint(hint));
        Ok(Some(hint))
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer_state.elapsed().as_secs()
    }

    pub fn elapsed_label(&self) -> String {
        self.timer_state.label()
    }

    pub fn score(&self) -> u32 {
        rules::compute_score(
            self.attempts,
            self.hints_used,
            self.elapsed_seconds(),
            self.difficulty,
        )
    }

    pub fn proximity(&self, guess: i64) -> f64 {
        rules::proximity(guess, self.target, self.min_range, self.max_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn test_target_within_range_for_all_difficulties() {
        let mut rng = StdRng::seed_from_u64(7);
        for difficulty in Difficulty::all() {
            for _ in 0..500 {
                let round = Round::new(GameMode::Advanced, difficulty, &mut rng);
                assert!(round.min_range <= round.target && round.target <= round.max_range);
                assert_eq!((round.min_range, round.max_range), difficulty.range());
            }
        }
    }

    #[test]
    fn test_seeded_rounds_repeat() {
        let a = Round::new(GameMode::Advanced, Difficulty::Hard, &mut StdRng::seed_from_u64(99));
        let b = Round::new(GameMode::Advanced, Difficulty::Hard, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.target, b.target);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_easy_round_end_to_end() {
        let mut round = Round::with_target(GameMode::Advanced, Difficulty::Easy, 27).unwrap();
        assert_eq!(round.phase(), RoundPhase::Ready);

        let outcomes: Vec<_> = ["10", "40", "27"]
            .iter()
            .map(|guess| round.submit_guess(guess).unwrap().unwrap())
            .collect();

        assert_eq!(
            outcomes,
            vec![GuessOutcome::TooLow, GuessOutcome::TooHigh, GuessOutcome::Equal]
        );
        assert_eq!(round.attempts, 3);
        assert!(round.is_over);
        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.history.len(), 3);
    }

    #[test]
    fn test_wrong_guess_keeps_round_open() {
        let mut round = Round::with_target(GameMode::Advanced, Difficulty::Medium, 60).unwrap();
        round.submit_guess("59").unwrap();
        assert!(!round.is_over);
        assert_eq!(round.phase(), RoundPhase::InProgress);
    }

    #[test]
    fn test_invalid_guess_is_not_an_attempt() {
        let mut round = Round::with_target(GameMode::Advanced, Difficulty::Easy, 27).unwrap();
        for raw in ["", "abc", "0", "51", "-3", "2.5"] {
            assert!(matches!(
                round.submit_guess(raw),
                Err(GameError::InvalidGuess { min: 1, max: 50 })
            ));
        }
        assert_eq!(round.attempts, 0);
        assert!(!round.is_over);
        assert!(round.history.is_empty());
    }

    #[test]
    fn test_guess_after_win_is_ignored() {
        let mut round = Round::with_target(GameMode::Advanced, Difficulty::Easy, 5).unwrap();
        round.submit_guess("5").unwrap();
        assert_eq!(round.submit_guess("6").unwrap(), None);
        assert_eq!(round.submit_guess("nope").unwrap(), None);
        assert_eq!(round.attempts, 1);
    }

    #[test]
    fn test_hint_counts_and_repeats() {
        let mut round = Round::with_target(GameMode::Advanced, Difficulty::Medium, 50).unwrap();
        let first = round.request_hint().unwrap().unwrap();
        let second = round.request_hint().unwrap().unwrap();
        assert_eq!(first, second);
        assert!(first.contains(50));
        assert_eq!(round.hints_used, 2);
    }

    #[test]
    fn test_hint_after_win_is_ignored() {
        let mut round = Round::with_target(GameMode::Advanced, Difficulty::Medium, 50).unwrap();
        round.submit_guess("50").unwrap();
        assert_eq!(round.request_hint().unwrap(), None);
        assert_eq!(round.hints_used, 0);
    }

    #[test]
    fn test_classic_round() {
        let mut round = Round::with_target(GameMode::Classic, Difficulty::Hard, 100).unwrap();
        assert_eq!((round.min_range, round.max_range), (1, 100));
        assert!(matches!(round.request_hint(), Err(GameError::HintsUnavailable)));
        assert_eq!(round.hints_used, 0);
        assert!(!round.has_timer());
        assert!(Round::with_target(GameMode::Classic, Difficulty::Hard, 150).is_none());
    }

    #[test]
    fn test_timer_stops_on_win() {
        let mut round = Round::with_target(GameMode::Advanced, Difficulty::Easy, 3).unwrap();
        let start = round.timer_state.started_timestamp;
        round
            .submit_guess_at("3", start + Duration::from_secs(65))
            .unwrap();
        assert_eq!(round.elapsed_seconds(), 65);
        assert_eq!(round.elapsed_label(), "01:05");
        // 1000 - 50 - 130
        assert_eq!(round.score(), 820);
    }
}
