//! High score table
//!
//! Top five runs, persisted as a JSON array of `{ "initials", "score" }`
//! objects sorted by score, best first.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Default file name, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "high_scores.json";

/// Exactly three uppercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Initials(String);

impl Initials {
    pub fn new(text: &str) -> Result<Self> {
        let upper = text.to_ascii_uppercase();
        if upper.len() == 3 && upper.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(upper))
        } else {
            Err(GameError::InvalidInitials(format!(
                "expected three letters, got {text:?}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Initials {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Initials> for String {
    fn from(value: Initials) -> Self {
        value.0
    }
}

impl fmt::Display for Initials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub initials: Initials,
    pub score: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from arbitrary entries, restoring order and size limits
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// A score earns initials when the table has room or it beats the lowest entry
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.iter().map(|e| e.score).min().is_some_and(|lowest| score > lowest)
    }

    /// Add a score, keeping the table sorted and capped.
    /// Returns the 1-based rank achieved, or None if it fell off the table.
    pub fn insert(&mut self, initials: Initials, score: u32) -> Option<usize> {
        // Ties go below existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(pos, HighScoreEntry { initials, score });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

/// Reads and writes the high score file.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table.  A missing or unreadable file counts as an empty table.
    pub fn load(&self) -> HighScores {
        match self.try_load() {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("No usable high scores at {}: {e}", self.path.display());
                HighScores::new()
            }
        }
    }

    fn try_load(&self) -> Result<HighScores> {
        let json = std::fs::read_to_string(&self.path)?;
        let entries: Vec<HighScoreEntry> = serde_json::from_str(&json)?;
        Ok(HighScores::from_entries(entries))
    }

    pub fn save(&self, scores: &HighScores) -> Result<()> {
        let json = serde_json::to_string_pretty(scores)?;
        std::fs::write(&self.path, json).map_err(|e| {
            GameError::Persistence(format!("writing {}: {e}", self.path.display()))
        })?;
        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}
