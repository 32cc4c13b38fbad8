use crate::error::GameResult;
use crate::model::{Difficulty, GameMode};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "numguess";
const SETTINGS_FILE: &str = "settings.json";
const CURRENT_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub classic_mode: bool,

    /// Name pre-filled when saving a score.
    #[serde(default)]
    pub player_name: Option<String>,
}

// Files written before versioning carry no version field.
fn default_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: CURRENT_VERSION,
            difficulty: Difficulty::default(),
            classic_mode: false,
            player_name: None,
        }
    }
}

impl Settings {
    /// Loads settings from `data_dir`, writing defaults when none are readable.
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::settings_path(data_dir);
        if let Ok(contents) = fs::read_to_string(&path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(err) => warn!(target: "settings", "Ignoring unreadable settings: {}", err),
            }
        }
        let default = Settings::default();
        if let Err(err) = default.save(data_dir) {
            warn!(target: "settings", "Could not write default settings: {}", err);
        }
        default
    }

    pub fn save(&self, data_dir: &Path) -> GameResult<()> {
        let path = Self::settings_path(data_dir);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn mode(&self) -> GameMode {
        if self.classic_mode {
            GameMode::Classic
        } else {
            GameMode::Advanced
        }
    }

    fn settings_path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    fn migrate(&mut self) {
        if self.version < CURRENT_VERSION {
            trace!(target: "settings", "Migrating settings from version {}", self.version);
            self.version = CURRENT_VERSION;
        }
    }

    /// `override_dir` wins, then the platform data directory, then the
    /// working directory.
    pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        match dirs::data_dir() {
            Some(dir) => dir.join(APP_DIR),
            None => {
                warn!(
                    target: "settings",
                    "No platform data directory, using the working directory"
                );
                PathBuf::from(format!(".{}", APP_DIR))
            }
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}
