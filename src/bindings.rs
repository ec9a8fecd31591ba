//! JavaScript entry points (wasm32 only)
//!
//! The page's UI controller owns a `BegatCore` and calls into it. Structured
//! results cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::platform::web::{LocalStorage, WebSpeech};
use crate::session::{CompletionInput, GameSession};
use crate::speech::{SpeechSynthesizer, Speaker};

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js)
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Begat core loaded");
}

/// Format seconds as `m:ss`
#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(total_seconds: u32) -> String {
    crate::scoring::format_time(u64::from(total_seconds))
}

#[wasm_bindgen]
pub struct BegatCore {
    session: GameSession<LocalStorage>,
    speaker: Speaker,
}

#[wasm_bindgen]
impl BegatCore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BegatCore {
        let session = GameSession::new(LocalStorage::new());
        let synth = WebSpeech::new().map(|s| Box::new(s) as Box<dyn SpeechSynthesizer>);
        let speaker = Speaker::new(synth, session.settings().speech_enabled);
        BegatCore { session, speaker }
    }

    /// Level table as JSON
    pub fn levels(&self) -> Result<String, JsValue> {
        to_json(&crate::levels::LEVELS)
    }

    /// Point table for a level as JSON
    #[wasm_bindgen(js_name = levelPoints)]
    pub fn level_points(&self, level_index: usize) -> Result<String, JsValue> {
        let points = self.session.level_points(level_index).map_err(to_js)?;
        to_json(points)
    }

    /// Tier for a mistake count as JSON
    #[wasm_bindgen(js_name = tierFor)]
    pub fn tier_for(&self, net_mistakes: u32) -> Result<String, JsValue> {
        to_json(self.session.engine().tier_for(net_mistakes))
    }

    /// Score a finished level; returns the win screen data as JSON
    #[wasm_bindgen(js_name = completeLevel)]
    pub fn complete_level(
        &self,
        level_index: usize,
        base_score: i32,
        net_mistakes: u32,
        elapsed_secs: u32,
    ) -> Result<String, JsValue> {
        let input = CompletionInput {
            base_score: i64::from(base_score),
            net_mistakes,
            elapsed_secs: u64::from(elapsed_secs),
        };
        let result = self
            .session
            .complete_level(level_index, input)
            .map_err(to_js)?;
        to_json(&result)
    }

    /// A level's board as JSON
    #[wasm_bindgen(js_name = highScores)]
    pub fn high_scores(&self, level_index: usize) -> Result<String, JsValue> {
        to_json(&self.session.high_scores(level_index))
    }

    /// Save a score and return the updated board as JSON
    #[wasm_bindgen(js_name = submitHighScore)]
    pub fn submit_high_score(
        &mut self,
        level_index: usize,
        name: &str,
        score: i32,
    ) -> Result<String, JsValue> {
        let board = self
            .session
            .submit_high_score(level_index, name, i64::from(score))
            .map_err(to_js)?;
        to_json(&board)
    }

    /// Remember the chosen level
    #[wasm_bindgen(js_name = startLevel)]
    pub fn start_level(&mut self, level_index: usize) -> Result<(), JsValue> {
        self.session.start_level(level_index).map_err(to_js)?;
        Ok(())
    }

    pub fn settings(&self) -> Result<String, JsValue> {
        to_json(self.session.settings())
    }

    #[wasm_bindgen(js_name = toggleSound)]
    pub fn toggle_sound(&mut self) -> bool {
        let mut settings = self.session.settings().clone();
        let enabled = settings.toggle_sound();
        self.session.save_settings(settings);
        enabled
    }

    #[wasm_bindgen(js_name = toggleMusic)]
    pub fn toggle_music(&mut self) -> bool {
        let mut settings = self.session.settings().clone();
        let enabled = settings.toggle_music();
        self.session.save_settings(settings);
        enabled
    }

    #[wasm_bindgen(js_name = toggleSpeech)]
    pub fn toggle_speech(&mut self) -> bool {
        let mut settings = self.session.settings().clone();
        let enabled = settings.toggle_speech();
        self.session.save_settings(settings);
        self.speaker.set_enabled(enabled);
        enabled
    }

    /// Read text aloud if speech is on
    pub fn speak(&self, text: &str) -> bool {
        self.speaker.speak(text)
    }
}

impl Default for BegatCore {
    fn default() -> Self {
        Self::new()
    }
}
