//! Begat - timeline card game core
//!
//! Core modules:
//! - `scoring`: Tier multipliers, speed bonus, final score, time formatting
//! - `levels`: Level layout and point tables
//! - `tiers`: Mistake tiers
//! - `highscores`: Top-3 board per level
//! - `platform`: Storage with in-memory fallback, browser backends
//! - `persistence`: Storage keys and tolerant decoding
//! - `session`: The object the UI controller talks to

#[cfg(target_arch = "wasm32")]
pub mod bindings;
pub mod error;
pub mod highscores;
pub mod levels;
pub mod persistence;
pub mod platform;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod speech;
pub mod tiers;

pub use error::{ScoringError, StorageError};
pub use highscores::{HighScoreEntry, HighScores};
pub use levels::{Level, LevelPoints, level_points};
pub use scoring::{RunInput, RunTally, ScoreReport, ScoringEngine, format_time, speed_bonus};
pub use session::{CompletionInput, GameSession, LevelResult};
pub use settings::Settings;
pub use tiers::{TierRule, TierTable};

/// Game configuration constants
pub mod consts {
    /// Prefix for every storage key
    pub const STORAGE_NAMESPACE: &str = "begat";
    /// Speed bonus in percent, awarded at or under the level's time limit
    pub const SPEED_BONUS_PCT: u32 = 20;
}
