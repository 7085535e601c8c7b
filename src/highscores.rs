//! High score leaderboard system
//!
//! Persisted to a JSON file, tracks top 10 scores.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Initials are clipped to this many characters
pub const MAX_INITIALS_LEN: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player initials, at most three characters, uppercased
    pub initials: String,
    /// Final session score
    pub score: u64,
}

/// High score leaderboard
#[derive(Debug, Clone)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
    path: PathBuf,
}

impl HighScoreTable {
    /// Create an empty leaderboard that will persist to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Vec::new(),
            path: path.into(),
        }
    }

    /// Load the leaderboard from `path`.
    ///
    /// A missing or unreadable file yields an empty table; gameplay never
    /// fails because persistence did.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Vec<HighScoreEntry>>(&json) {
                Ok(entries) => {
                    log::info!("Loaded {} high scores from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    log::warn!("Malformed high score file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => {
                log::info!("No high score file at {}, starting fresh", path.display());
                Vec::new()
            }
        };
        Self { entries, path }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Full table: must strictly beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies).
    ///
    /// Initials are trimmed, clipped to three characters and uppercased.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    /// Saves on success.
    pub fn add(&mut self, initials: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let initials: String = initials
            .trim()
            .chars()
            .take(MAX_INITIALS_LEN)
            .flat_map(char::to_uppercase)
            .collect();
        let entry = HighScoreEntry { initials, score };

        // Insert behind existing entries with the same score, so earlier
        // achievements rank first on ties
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        self.save();

        Some(pos + 1)
    }

    /// Entries in descending score order
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Path the table persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the leaderboard to its JSON file. Failures are logged, never
    /// surfaced to gameplay.
    pub fn save(&self) {
        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("Failed to save high scores to {}: {}", self.path.display(), e);
                } else {
                    log::info!("High scores saved ({} entries)", self.entries.len());
                }
            }
            Err(e) => log::warn!("Failed to serialize high scores: {}", e),
        }
    }
}
