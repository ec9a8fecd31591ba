//! Browser backends (wasm32 only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, SpeechSynthesis, SpeechSynthesisUtterance, Storage};

use super::storage::KeyValueStore;
use crate::error::StorageError;
use crate::speech::SpeechSynthesizer;

fn storage_error(err: JsValue) -> StorageError {
    match err.dyn_ref::<DomException>().map(|e| e.name()) {
        Some(name) if name == "QuotaExceededError" => StorageError::QuotaExceeded,
        Some(name) if name == "SecurityError" => StorageError::AccessDenied,
        Some(name) => StorageError::Backend(name),
        None => StorageError::Backend(format!("{:?}", err)),
    }
}

/// `window.localStorage`, which may be missing or refuse access
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scores kept for this session only");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(storage_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(storage_error)
    }
}

/// `window.speechSynthesis`
pub struct WebSpeech {
    synth: SpeechSynthesis,
}

impl WebSpeech {
    /// None when the browser has no speech synthesis
    pub fn new() -> Option<Self> {
        let synth = web_sys::window()?.speech_synthesis().ok()?;
        Some(Self { synth })
    }
}

impl SpeechSynthesizer for WebSpeech {
    fn speak(&self, text: &str) {
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => self.synth.speak(&utterance),
            Err(e) => log::warn!("Failed to create utterance: {:?}", e),
        }
    }
}
