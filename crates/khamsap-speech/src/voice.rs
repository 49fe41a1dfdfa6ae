use std::sync::{Arc, PoisonError, RwLock};

use khamsap_core::Language;

/// A synthesis voice as enumerated by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Identifier handed back to the device when speaking
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Language tag, e.g. "th", "th-TH", "en-US"
    pub lang: String,
}

impl Voice {
    pub fn new(id: &str, name: &str, lang: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }
}

/// Which voice to prefer, in priority order: target language, fallback prefix, anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePreference {
    pub language: String,
    pub name_hint: String,
    pub fallback_prefix: String,
}

impl VoicePreference {
    pub fn new(language: &str, name_hint: &str, fallback_prefix: &str) -> Self {
        Self {
            language: language.to_lowercase(),
            name_hint: name_hint.to_lowercase(),
            fallback_prefix: fallback_prefix.to_lowercase(),
        }
    }

    pub fn for_language(language: &dyn Language) -> Self {
        Self::new(
            language.code(),
            language.voice_name_hint(),
            language.fallback_prefix(),
        )
    }

    /// Primary subtag equals the target language, or the name carries the hint.
    fn matches_target(&self, voice: &Voice) -> bool {
        let primary = voice.lang.split(['-', '_']).next().unwrap_or_default();
        let lang_match = !self.language.is_empty() && primary.eq_ignore_ascii_case(&self.language);
        let name_match =
            !self.name_hint.is_empty() && voice.name.to_lowercase().contains(&self.name_hint);
        lang_match || name_match
    }

    fn matches_fallback(&self, voice: &Voice) -> bool {
        !self.fallback_prefix.is_empty()
            && voice.lang.to_lowercase().starts_with(&self.fallback_prefix)
    }
}

/// Pick a voice for `preference`. `None` only when `voices` is empty, in which
/// case the device default voice is used.
pub fn select_voice<'a>(voices: &'a [Voice], preference: &VoicePreference) -> Option<&'a Voice> {
    voices
        .iter()
        .find(|v| preference.matches_target(v))
        .or_else(|| voices.iter().find(|v| preference.matches_fallback(v)))
        .or_else(|| voices.first())
}

/// Process-wide voice list, refreshed by whoever watches the device.
///
/// Readers take a snapshot per request so a refresh is picked up by the next utterance.
#[derive(Debug, Clone, Default)]
pub struct VoiceList {
    voices: Arc<RwLock<Vec<Voice>>>,
}

impl VoiceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Voice> {
        self.voices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the list. Returns true when it actually changed.
    pub fn replace(&self, voices: Vec<Voice>) -> bool {
        let mut current = self.voices.write().unwrap_or_else(PoisonError::into_inner);
        if *current == voices {
            return false;
        }
        *current = voices;
        true
    }

    pub fn len(&self) -> usize {
        self.voices.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
