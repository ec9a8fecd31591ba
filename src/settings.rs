//! Game settings and preferences
//!
//! Persisted separately from high scores, through the same storage handle.

use serde::{Deserialize, Serialize};

use crate::levels::LEVELS;
use crate::persistence::{self, settings_key};
use crate::platform::{KeyValueStore, StorageHandle};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects on answer/placement
    pub sound_enabled: bool,
    /// Background music
    pub music_enabled: bool,
    /// Read descriptions and feedback aloud
    pub speech_enabled: bool,

    // === Accessibility ===
    /// High contrast mode
    pub high_contrast: bool,
    /// Colour-blind friendly palette
    pub colorblind: bool,

    /// Level picked last time (0-based index)
    pub last_level: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            speech_enabled: false,

            high_contrast: false,
            colorblind: false,

            last_level: 0,
        }
    }
}

impl Settings {
    /// Toggle sound effects, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Toggle speech, returning the new state
    pub fn toggle_speech(&mut self) -> bool {
        self.speech_enabled = !self.speech_enabled;
        self.speech_enabled
    }

    /// Toggle music, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Load settings; missing or malformed data gives defaults
    pub fn load<S: KeyValueStore>(storage: &StorageHandle<S>) -> Self {
        let json = storage.get_item(&settings_key());
        let decoded = persistence::decode::<Settings>(json.as_deref());
        if decoded.is_fallback() {
            log::info!("Using default settings");
        } else {
            log::info!("Loaded settings");
        }

        let mut settings = decoded.into_inner();
        if settings.last_level >= LEVELS.len() {
            log::warn!("Saved level {} out of range, resetting", settings.last_level);
            settings.last_level = 0;
        }
        settings
    }

    /// Save settings
    pub fn save<S: KeyValueStore>(&self, storage: &mut StorageHandle<S>) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_item(&settings_key(), &json);
                log::info!("Settings saved");
            }
            Err(e) => log::error!("Failed to serialize settings: {}", e),
        }
    }
}
