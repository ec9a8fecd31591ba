//! Spoken feedback gate
//!
//! Decides whether a line goes to the synthesizer. Playback itself is
//! fire-and-forget; nothing waits for an utterance to finish.

/// Something that can read text aloud
pub trait SpeechSynthesizer {
    fn speak(&self, text: &str);
}

/// Speak only when enabled, a synthesizer exists, and there is something to say
pub fn should_speak(enabled: bool, synthesizer_available: bool, text: &str) -> bool {
    enabled && synthesizer_available && !text.trim().is_empty()
}

/// Speech toggle plus an optional synthesizer
pub struct Speaker {
    synth: Option<Box<dyn SpeechSynthesizer>>,
    enabled: bool,
}

impl Speaker {
    pub fn new(synth: Option<Box<dyn SpeechSynthesizer>>, enabled: bool) -> Self {
        if synth.is_none() {
            log::warn!("No speech synthesizer - speech disabled");
        }
        Self { synth, enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Hand `text` to the synthesizer. Returns whether it was spoken.
    pub fn speak(&self, text: &str) -> bool {
        if !should_speak(self.enabled, self.synth.is_some(), text) {
            return false;
        }
        let Some(synth) = &self.synth else {
            return false;
        };
        synth.speak(text);
        true
    }
}
