//! High score leaderboard system
//!
//! One top-3 board per level, persisted as a JSON array of `{name, score}`.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, high_scores_key};
use crate::platform::{KeyValueStore, StorageHandle};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 3;

/// Name recorded when the player leaves the field blank
pub const ANONYMOUS: &str = "Anonymous";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: i64,
}

impl HighScoreEntry {
    pub fn new(name: &str, score: i64) -> Self {
        Self {
            name: normalize_name(name),
            score,
        }
    }
}

/// Trimmed player name, or "Anonymous" when blank
pub fn normalize_name(name: &str) -> String {
    match name.trim() {
        "" => ANONYMOUS.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// High score leaderboard, best first.
///
/// Entries stay sorted and capped: every way in, including deserialization,
/// goes through `From<Vec<HighScoreEntry>>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Vec<HighScoreEntry>", into = "Vec<HighScoreEntry>")]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl From<Vec<HighScoreEntry>> for HighScores {
    fn from(mut entries: Vec<HighScoreEntry>) -> Self {
        // Stable sort keeps submission order among equal scores
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }
}

impl From<HighScores> for Vec<HighScoreEntry> {
    fn from(scores: HighScores) -> Self {
        scores.entries
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if a score qualifies for the leaderboard. Ties with the
    /// lowest entry of a full board do not.
    pub fn qualifies(&self, score: i64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: i64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify.
    ///
    /// A new score goes below existing entries with the same score, so the
    /// earlier submission keeps the higher rank.
    pub fn add_score(&mut self, name: &str, score: i64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry::new(name, score);

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Leaderboard with the score added, leaving `self` untouched
    pub fn with_score(&self, name: &str, score: i64) -> Self {
        let mut next = self.clone();
        next.add_score(name, score);
        next
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load a level's high scores; missing or malformed data gives an empty board
    pub fn load<S: KeyValueStore>(storage: &StorageHandle<S>, level_index: usize) -> Self {
        let json = storage.get_item(&high_scores_key(level_index));
        let scores = persistence::parse_with_fallback::<HighScores>(json.as_deref());
        log::info!(
            "Loaded {} high scores for level {}",
            scores.entries.len(),
            level_index
        );
        scores
    }

    /// Save a level's high scores
    pub fn save<S: KeyValueStore>(&self, storage: &mut StorageHandle<S>, level_index: usize) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_item(&high_scores_key(level_index), &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
            Err(e) => log::error!("Failed to serialize high scores: {}", e),
        }
    }
}
