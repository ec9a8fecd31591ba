//! Level definitions and point tables
//!
//! Levels are addressed two ways: the 1-based level number used by the point
//! table, and the 0-based index used for storage keys and the level picker.

use serde::{Deserialize, Serialize};

use crate::error::{ScoringError, ScoringResult};

/// Number of playable levels
pub const LEVEL_COUNT: u32 = 4;

/// Points awarded and deducted on a given level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPoints {
    /// Quiz answered correctly on the first try
    pub full_correct: i64,
    /// Quiz answered correctly after one or more wrong picks
    pub assisted: i64,
    /// Applied for every wrong pick (negative)
    pub wrong_penalty: i64,
    /// Given back when a missed card is later redeemed
    pub redemption_refund: i64,
}

impl LevelPoints {
    /// Bonus for dropping a card into its correct timeline slot
    pub fn placement_bonus(&self) -> i64 {
        self.full_correct / 2
    }

    /// Points for a correct quiz answer on the given attempt (1-based)
    pub fn answer_points(&self, attempt: u32) -> i64 {
        if attempt <= 1 {
            self.full_correct
        } else {
            self.assisted
        }
    }
}

static LEVEL_POINTS: [LevelPoints; LEVEL_COUNT as usize] = [
    LevelPoints {
        full_correct: 50,
        assisted: 25,
        wrong_penalty: -20,
        redemption_refund: 20,
    },
    LevelPoints {
        full_correct: 75,
        assisted: 37,
        wrong_penalty: -40,
        redemption_refund: 40,
    },
    LevelPoints {
        full_correct: 100,
        assisted: 50,
        wrong_penalty: -70,
        redemption_refund: 70,
    },
    LevelPoints {
        full_correct: 150,
        assisted: 75,
        wrong_penalty: -120,
        redemption_refund: 120,
    },
];

/// Look up the point table for a 1-based level number
pub fn level_points(level: u32) -> ScoringResult<&'static LevelPoints> {
    level
        .checked_sub(1)
        .and_then(|i| LEVEL_POINTS.get(i as usize))
        .ok_or(ScoringError::UnknownLevel(level))
}

/// Difficulty shown on the level picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A playable slice of the genealogy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    pub name: &'static str,
    /// First card index (inclusive)
    pub start: usize,
    /// Last card index (inclusive)
    pub end: usize,
    pub difficulty: Difficulty,
    /// Finish within this many seconds for the speed bonus
    pub time_limit_secs: u32,
}

impl Level {
    /// Number of cards dealt on this level
    pub fn card_count(&self) -> usize {
        self.end - self.start + 1
    }
}

pub static LEVELS: [Level; LEVEL_COUNT as usize] = [
    Level {
        name: "Patriarchs",
        start: 0,
        end: 13,
        difficulty: Difficulty::Easy,
        time_limit_secs: 180,
    },
    Level {
        name: "Kings of Judah",
        start: 14,
        end: 27,
        difficulty: Difficulty::Medium,
        time_limit_secs: 240,
    },
    Level {
        name: "Post-Exile",
        start: 28,
        end: 41,
        difficulty: Difficulty::Medium,
        time_limit_secs: 300,
    },
    Level {
        name: "Full Lineage",
        start: 0,
        end: 41,
        difficulty: Difficulty::Hard,
        time_limit_secs: 480,
    },
];

/// Look up a level by its 0-based index
pub fn level(index: usize) -> ScoringResult<&'static Level> {
    LEVELS
        .get(index)
        .ok_or(ScoringError::UnknownLevel(level_number(index)))
}

/// Convert a 0-based level index to the 1-based level number
pub fn level_number(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1))
}
