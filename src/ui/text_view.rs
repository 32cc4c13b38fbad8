use itertools::Itertools;
use log::error;
use std::io::Write;

use crate::events::EventHandler;
use crate::model::{
    Difficulty, GameEngineEvent, GameMode, GuessOutcome, HistoryItem, Message, Severity,
    Standings, WinSummary,
};

const GAUGE_WIDTH: usize = 20;

/// Line-oriented presentation of engine events.
pub struct TextView<W: Write> {
    out: W,
    mode: GameMode,
    difficulty: Difficulty,
    attempts: u32,
    hints_used: u32,
    timer_label: Option<String>,
    history: Vec<HistoryItem>,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            attempts: 0,
            hints_used: 0,
            timer_label: None,
            history: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn prompt(&mut self) {
        let status = match (&self.timer_label, self.mode) {
            (Some(label), GameMode::Advanced) => format!(
                "[{} {} | attempts {} | hints {}]",
                self.difficulty, label, self.attempts, self.hints_used
            ),
            _ => format!("[attempts {}]", self.attempts),
        };
        self.write(format_args!("{} > ", status));
        if let Err(err) = self.out.flush() {
            error!(target: "text_view", "Failed to flush output: {}", err);
        }
    }

    pub fn show_time(&mut self) {
        match self.timer_label.clone() {
            Some(label) => self.line(&format!("Elapsed: {}", label)),
            None => self.line("This round is not timed."),
        }
    }

    pub fn show_text(&mut self, text: &str) {
        self.line(text);
    }

    fn line(&mut self, text: &str) {
        self.write(format_args!("{}\n", text));
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args) {
            error!(target: "text_view", "Failed to write output: {}", err);
        }
    }

    fn show_message(&mut self, message: &Message) {
        let marker = match message.severity {
            Severity::Info => "",
            Severity::Error => "! ",
            Severity::Hint => "> ",
            Severity::Success => "* ",
        };
        self.line(&format!("{}{}", marker, message.text));
    }

    fn show_proximity(&mut self, proximity: f64) {
        let clamped = proximity.clamp(0.0, 100.0);
        let filled = ((clamped / 100.0) * GAUGE_WIDTH as f64).round() as usize;
        let gauge = format!(
            "  cold [{}{}] hot  {:.0}%",
            "#".repeat(filled),
            "-".repeat(GAUGE_WIDTH - filled),
            clamped
        );
        self.line(&gauge);
    }

    fn show_win(&mut self, summary: &WinSummary) {
        self.line("+------------------------------+");
        self.line(&format!("| Number:   {:<19}|", summary.target));
        self.line(&format!("| Attempts: {:<19}|", summary.attempts));
        if let Some(score) = summary.score {
            self.line(&format!("| Time:     {:<19}|", summary.elapsed));
            self.line(&format!("| Hints:    {:<19}|", summary.hints_used));
            self.line(&format!("| Score:    {:<19}|", score));
        }
        self.line("+------------------------------+");
        let history = format_history(&self.history);
        if !history.is_empty() {
            self.line(&format!("Guesses: {}", history));
        }
        match summary.score {
            Some(_) => {
                self.line("Type `save [name]` to record your score, or `again` to play again.")
            }
            None => self.line("Press Enter to play again."),
        }
    }

    fn show_standings(&mut self, standings: &Standings) {
        self.line("High scores:");
        match standings {
            Standings::NoScoresYet => self.line("  No high scores yet"),
            Standings::Ranked(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    self.line(&format!(
                        "  {}. {}: {} ({})",
                        index + 1,
                        entry.name,
                        entry.score,
                        entry.difficulty
                    ));
                }
            }
        }
    }
}

impl<W: Write> EventHandler<GameEngineEvent> for TextView<W> {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::RoundStarted {
                mode,
                difficulty,
                min_range,
                max_range,
                timed,
                ..
            } => {
                self.mode = *mode;
                self.difficulty = *difficulty;
                self.history.clear();
                self.timer_label = timed.then(|| "00:00".to_string());
                let label = match mode {
                    GameMode::Classic => "classic".to_string(),
                    GameMode::Advanced => difficulty.to_string(),
                };
                self.line(&format!("--- New {} round: {}-{} ---", label, min_range, max_range));
            }
            GameEngineEvent::TargetRevealed(target) => {
                self.line(&format!("(debug) target is {}", target))
            }
            GameEngineEvent::CountersChanged {
                attempts,
                hints_used,
            } => {
                self.attempts = *attempts;
                self.hints_used = *hints_used;
            }
            GameEngineEvent::MessageChanged(message) => self.show_message(message),
            GameEngineEvent::HistoryAppended(item) => self.history.push(*item),
            GameEngineEvent::ProximityChanged(proximity) => {
                if self.attempts > 0 {
                    self.show_proximity(*proximity);
                }
            }
            GameEngineEvent::TimerChanged(label) => self.timer_label = Some(label.clone()),
            GameEngineEvent::RoundWon { summary, .. } => self.show_win(summary),
            GameEngineEvent::StandingsChanged(standings) => self.show_standings(standings),
        }
    }
}

fn format_history(history: &[HistoryItem]) -> String {
    history
        .iter()
        .map(|item| match item {
            HistoryItem::Guess { value, outcome } => {
                let marker = match outcome {
                    GuessOutcome::TooLow => "^",
                    GuessOutcome::TooHigh => "v",
                    GuessOutcome::Equal => "!",
                };
                format!("{}{}", value, marker)
            }
            HistoryItem::Hint(range) => format!("[hint {}-{}]", range.lo, range.hi),
        })
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HintRange, LeaderboardEntry};

    fn output(view: TextView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    fn started(view: &mut TextView<Vec<u8>>) {
        view.handle_event(&GameEngineEvent::RoundStarted {
            round_id: uuid::Uuid::new_v4(),
            mode: GameMode::Advanced,
            difficulty: Difficulty::Easy,
            min_range: 1,
            max_range: 50,
            timed: true,
        });
    }

    #[test]
    fn test_round_start_and_messages() {
        let mut view = TextView::new(Vec::new());
        started(&mut view);
        view.handle_event(&GameEngineEvent::MessageChanged(Message::new(
            "Too low! Try a higher number.",
            Severity::Hint,
        )));
        let text = output(view);
        assert!(text.contains("--- New easy round: 1-50 ---"));
        assert!(text.contains("> Too low! Try a higher number."));
    }

    #[test]
    fn test_proximity_gauge() {
        let mut view = TextView::new(Vec::new());
        started(&mut view);
        view.handle_event(&GameEngineEvent::ProximityChanged(0.0));
        view.handle_event(&GameEngineEvent::CountersChanged {
            attempts: 1,
            hints_used: 0,
        });
        view.handle_event(&GameEngineEvent::ProximityChanged(75.0));
        let text = output(view);
        assert_eq!(text.matches("cold [").count(), 1);
        assert!(text.contains("[###############-----] hot  75%"));
    }

    #[test]
    fn test_prompt_shows_status() {
        let mut view = TextView::new(Vec::new());
        started(&mut view);
        view.handle_event(&GameEngineEvent::TimerChanged("01:05".to_string()));
        view.handle_event(&GameEngineEvent::CountersChanged {
            attempts: 2,
            hints_used: 1,
        });
        view.prompt();
        assert!(output(view).ends_with("[easy 01:05 | attempts 2 | hints 1] > "));
    }

    #[test]
    fn test_win_summary_with_history() {
        let mut view = TextView::new(Vec::new());
        started(&mut view);
        for item in [
            HistoryItem::Guess { value: 10, outcome: GuessOutcome::TooLow },
            HistoryItem::Hint(HintRange { lo: 15, hi: 39 }),
            HistoryItem::Guess { value: 27, outcome: GuessOutcome::Equal },
        ] {
            view.handle_event(&GameEngineEvent::HistoryAppended(item));
        }
        view.handle_event(&GameEngineEvent::RoundWon {
            round_id: uuid::Uuid::new_v4(),
            summary: WinSummary {
                target: 27,
                attempts: 2,
                hints_used: 1,
                difficulty: Difficulty::Easy,
                elapsed: "00:12".to_string(),
                elapsed_seconds: 12,
                score: Some(780),
            },
        });
        let text = output(view);
        assert!(text.contains("| Score:    780"));
        assert!(text.contains("Guesses: 10^ [hint 15-39] 27!"));
        assert!(text.contains("save [name]"));
    }

    #[test]
    fn test_standings() {
        let mut view = TextView::new(Vec::new());
        view.handle_event(&GameEngineEvent::StandingsChanged(Standings::NoScoresYet));
        view.handle_event(&GameEngineEvent::StandingsChanged(Standings::Ranked(vec![
            LeaderboardEntry::new(
                "Ada",
                1450,
                3,
                "00:20".into(),
                Difficulty::Medium,
                "2024-02-02".into(),
            ),
        ])));
        let text = output(view);
        assert!(text.contains("No high scores yet"));
        assert!(text.contains("1. Ada: 1450 (medium)"));
    }
}
