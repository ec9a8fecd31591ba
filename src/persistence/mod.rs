//! Persisted data layout and tolerant decoding
//!
//! Features:
//! - One key per level for high scores, one key for settings
//! - `Outcome` marks values that came from a fallback instead of real data
//! - Malformed or missing data decodes to a default rather than an error

use serde::de::DeserializeOwned;

use crate::consts::STORAGE_NAMESPACE;

/// A value that was either read/written as intended or replaced by a fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    Persisted(T),
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Persisted(v) | Outcome::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

/// Storage key for a level's high scores (0-based level index)
pub fn high_scores_key(level_index: usize) -> String {
    format!("{STORAGE_NAMESPACE}_highscores_level_{level_index}")
}

/// Storage key for player settings
pub fn settings_key() -> String {
    format!("{STORAGE_NAMESPACE}_settings")
}

/// Decode JSON, keeping track of whether the default had to be used
pub fn decode<T: DeserializeOwned + Default>(serialized: Option<&str>) -> Outcome<T> {
    let Some(json) = serialized else {
        return Outcome::Fallback(T::default());
    };
    match serde_json::from_str(json) {
        Ok(value) => Outcome::Persisted(value),
        Err(e) => {
            log::warn!("Discarding malformed saved data: {}", e);
            Outcome::Fallback(T::default())
        }
    }
}

/// Decode JSON, substituting the default for missing or malformed input
pub fn parse_with_fallback<T: DeserializeOwned + Default>(serialized: Option<&str>) -> T {
    decode(serialized).into_inner()
}
