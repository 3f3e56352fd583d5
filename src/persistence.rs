#![warn(clippy::all, clippy::pedantic)]

// High scores are plain text, one integer per line, best first.
// Statistics live next to them as a small TOML file.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::game::MAX_HIGH_SCORES;
use crate::round::RoundSummary;

const HIGH_SCORES_FILE: &str = "highscores.txt";
const STATS_FILE: &str = "stats.toml";

// Environment variable that overrides the data directory
pub const DATA_DIR_ENV_VAR: &str = "FRUIT_SORTER_DATA_DIR";

/// A finished round's final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub final_score: u32,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl SessionResult {
    #[must_use]
    pub fn now(final_score: u32) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            final_score,
            timestamp,
        }
    }
}

/// Descending list of the best scores, never longer than [`MAX_HIGH_SCORES`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScores {
    scores: Vec<u32>,
}

impl HighScores {
    #[must_use]
    pub fn new(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    /// Inserts `score`, keeps the list sorted and trims it.
    /// Returns the 1-based rank if the score made the list.
    pub fn insert(&mut self, score: u32) -> Option<usize> {
        // Ties go after existing entries so older scores keep their rank
        let index = self
            .scores
            .iter()
            .position(|&existing| score > existing)
            .unwrap_or(self.scores.len());
        self.scores.insert(index, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.scores
    }

    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Lifetime statistics across rounds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub total_games: u32,
    pub fruits_matched: u32,
    pub highest_combo: u32,
    pub total_score: u64,
    pub achievements: Vec<String>,
    pub fruit_type_matches: BTreeMap<String, u32>,
}

impl PlayerStats {
    pub fn record_round(&mut self, summary: &RoundSummary) {
        self.total_games += 1;
        self.fruits_matched += summary.catches;
        self.highest_combo = self.highest_combo.max(summary.max_combo);
        self.total_score += u64::from(summary.score);
        for (fruit, count) in &summary.catches_by_category {
            *self
                .fruit_type_matches
                .entry((*fruit).to_string())
                .or_insert(0) += count;
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_score(&self) -> f32 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_score as f32 / self.total_games as f32
        }
    }

    #[must_use]
    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a == name)
    }

    /// Records an achievement; returns false if it was already unlocked.
    pub fn unlock(&mut self, name: &str) -> bool {
        if self.has_achievement(name) {
            return false;
        }
        self.achievements.push(name.to_string());
        true
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "save file I/O error: {err}"),
            StoreError::Serialize(err) => write!(f, "could not serialize stats: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Serialize(err)
    }
}

/// Where high scores and statistics are kept between sessions.
///
/// Loading never fails: missing or unreadable data comes back empty.
pub trait ScoreStore {
    fn load_high_scores(&self) -> Vec<u32>;
    fn save_high_scores(&mut self, scores: &[u32]) -> Result<(), StoreError>;
    fn load_stats(&self) -> PlayerStats;
    fn save_stats(&mut self, stats: &PlayerStats) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load_high_scores(&self) -> Vec<u32> {
        (**self).load_high_scores()
    }

    fn save_high_scores(&mut self, scores: &[u32]) -> Result<(), StoreError> {
        (**self).save_high_scores(scores)
    }

    fn load_stats(&self) -> PlayerStats {
        (**self).load_stats()
    }

    fn save_stats(&mut self, stats: &PlayerStats) -> Result<(), StoreError> {
        (**self).save_stats(stats)
    }
}

/// Files under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses `FRUIT_SORTER_DATA_DIR`, then the platform data directory, then the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR) {
            return Self::new(dir);
        }
        match dirs::data_dir() {
            Some(dir) => Self::new(dir.join("fruit_sorter")),
            None => Self::new("."),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn high_scores_path(&self) -> PathBuf {
        self.dir.join(HIGH_SCORES_FILE)
    }

    fn stats_path(&self) -> PathBuf {
        self.dir.join(STATS_FILE)
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl ScoreStore for FileStore {
    fn load_high_scores(&self) -> Vec<u32> {
        let Ok(content) = fs::read_to_string(self.high_scores_path()) else {
            debug!("No high score file, starting fresh");
            return Vec::new();
        };
        let scores = content
            .lines()
            .filter_map(|line| line.trim().parse::<u32>().ok())
            .collect();
        HighScores::new(scores).as_slice().to_vec()
    }

    fn save_high_scores(&mut self, scores: &[u32]) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let mut content = String::new();
        for score in scores {
            content.push_str(&score.to_string());
            content.push('\n');
        }
        fs::write(self.high_scores_path(), content)?;
        Ok(())
    }

    fn load_stats(&self) -> PlayerStats {
        let Ok(content) = fs::read_to_string(self.stats_path()) else {
            return PlayerStats::default();
        };
        match toml::from_str(&content) {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Ignoring unreadable stats file: {e}");
                PlayerStats::default()
            }
        }
    }

    fn save_stats(&mut self, stats: &PlayerStats) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let content = toml::to_string_pretty(stats)?;
        fs::write(self.stats_path(), content)?;
        Ok(())
    }
}

/// Keeps everything in memory; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_scores: Vec<u32>,
    pub stats: PlayerStats,
    pub saves: usize,
}

impl ScoreStore for MemoryStore {
    fn load_high_scores(&self) -> Vec<u32> {
        self.high_scores.clone()
    }

    fn save_high_scores(&mut self, scores: &[u32]) -> Result<(), StoreError> {
        self.high_scores = scores.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_stats(&self) -> PlayerStats {
        self.stats.clone()
    }

    fn save_stats(&mut self, stats: &PlayerStats) -> Result<(), StoreError> {
        self.stats = stats.clone();
        Ok(())
    }
}
