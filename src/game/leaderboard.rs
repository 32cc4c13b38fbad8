use crate::error::GameResult;
use crate::model::{LeaderboardEntry, Standings};
use log::{debug, trace, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the persisted slot holding the serialized leaderboard.
pub const SLOT_NAME: &str = "numberGameHighScores";
pub const MAX_ENTRIES: usize = 10;
/// How many entries the high-score panel shows.
pub const DISPLAYED_ENTRIES: usize = 5;

/// A single named storage slot. Contents are replaced wholesale on write.
pub trait ScoreSlot {
    fn read(&self) -> GameResult<Option<String>>;
    fn write(&mut self, contents: &str) -> GameResult<()>;
}

#[derive(Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{}.json", SLOT_NAME)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreSlot for FileSlot {
    fn read(&self) -> GameResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, contents: &str) -> GameResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: Option<String>,
}

impl MemorySlot {
    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: Some(contents.to_string()),
        }
    }
}

impl ScoreSlot for MemorySlot {
    fn read(&self) -> GameResult<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> GameResult<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

/// Top scores, ranked by score. Only ever touched from the event loop thread;
/// the read-modify-write in [`Leaderboard::record_score`] is not atomic.
pub struct Leaderboard {
    slot: Box<dyn ScoreSlot>,
}

impl std::fmt::Debug for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Leaderboard {{ entries: {} }}", self.entries().len())
    }
}

impl Leaderboard {
    pub fn new(slot: impl ScoreSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    /// Persisted entries. Missing, unreadable or corrupt data reads as empty.
    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        let contents = match self.slot.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(target: "leaderboard", "Could not read high scores: {}", err);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<LeaderboardEntry>>(&contents) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(target: "leaderboard", "Ignoring corrupt high scores: {}", err);
                Vec::new()
            }
        }
    }

    pub fn record_score(&mut self, entry: LeaderboardEntry) -> GameResult<Vec<LeaderboardEntry>> {
        trace!(target: "leaderboard", "Recording score {:?}", entry);
        let mut entries = self.entries();
        entries.push(entry);

        // stable, so earlier entries stay ahead on ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);

        let contents = serde_json::to_string(&entries)?;
        self.slot.write(&contents)?;
        Ok(entries)
    }

    pub fn top_entries(&self, limit: usize) -> Standings {
        let entries = self.entries();
        if entries.is_empty() {
            Standings::NoScoresYet
        } else {
            Standings::Ranked(entries.into_iter().take(limit).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry::new(
            name,
            score,
            3,
            "00:42".to_string(),
            Difficulty::Medium,
            "2024-05-01".to_string(),
        )
    }

    #[test]
    fn test_empty_board_has_sentinel() {
        let board = Leaderboard::new(MemorySlot::default());
        assert_eq!(board.top_entries(5), Standings::NoScoresYet);
    }

    #[test]
    fn test_corrupt_payload_reads_as_empty() {
        let mut board = Leaderboard::new(MemorySlot::with_contents("{not json"));
        assert!(board.entries().is_empty());
        assert_eq!(board.top_entries(5), Standings::NoScoresYet);

        let entries = board.record_score(entry("ada", 900)).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_never_more_than_ten_and_sorted() {
        let mut board = Leaderboard::new(MemorySlot::default());
        let scores = [300, 1200, 50, 800, 800, 0, 1999, 450, 620, 1000, 75, 1340, 200];
        for (i, score) in scores.iter().enumerate() {
            let entries = board.record_score(entry(&format!("p{}", i), *score)).unwrap();
            assert!(entries.len() <= MAX_ENTRIES);
            assert!(entries.windows(2).all(|pair| pair[0].score >= pair[1].score));
        }
        let persisted = board.entries();
        assert_eq!(persisted.len(), MAX_ENTRIES);
        assert_eq!(persisted[0].score, 1999);
        assert_eq!(persisted.last().map(|e| e.score), Some(200));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new(MemorySlot::default());
        board.record_score(entry("first", 500)).unwrap();
        let entries = board.record_score(entry("second", 500)).unwrap();
        assert_eq!(entries[0].name, "first");
        assert_eq!(entries[1].name, "second");
    }

    #[test]
    fn test_top_entries_limit() {
        let mut board = Leaderboard::new(MemorySlot::default());
        for score in [10, 20, 30, 40, 50, 60, 70] {
            board.record_score(entry("x", score)).unwrap();
        }
        match board.top_entries(DISPLAYED_ENTRIES) {
            Standings::Ranked(entries) => {
                assert_eq!(entries.len(), 5);
                assert_eq!(entries[0].score, 70);
            }
            Standings::NoScoresYet => panic!("expected ranked entries"),
        }
    }

    #[test]
    fn test_reads_legacy_entries() {
        let stored = r#"[{"name":"Sam","score":1250,"attempts":4,"time":"00:31",
            "difficulty":"hard","date":"3/14/2024"}]"#;
        let board = Leaderboard::new(MemorySlot::with_contents(stored));
        let entries = board.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].difficulty, Difficulty::Hard);
        assert_eq!(entries[0].elapsed, "00:31");
    }

    #[test]
    fn test_file_slot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::in_dir(&dir.path().join("nested"));
        let path = slot.path().to_path_buf();
        let mut board = Leaderboard::new(slot);

        assert!(board.entries().is_empty());
        board.record_score(entry("ada", 700)).unwrap();

        assert!(path.exists());
        let reopened = Leaderboard::new(FileSlot::in_dir(&dir.path().join("nested")));
        assert_eq!(reopened.entries()[0].name, "ada");
    }
}
