use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "espeak-ng".to_string()
}

fn default_rate() -> f32 {
    0.92
}

fn default_base_wpm() -> u32 {
    175
}

fn default_pause_ms() -> u64 {
    150
}

fn default_voice_refresh_ms() -> u64 {
    2000
}

/// When the read-through moves on to the next entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Fixed pause after the utterance is dispatched
    #[default]
    Dispatch,
    /// Wait until the device is done speaking, then pause
    Completion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// espeak-ng compatible synthesizer binary
    pub program: String,
    /// Speaking rate relative to normal
    pub rate: f32,
    /// Synthesizer words per minute at rate 1.0
    pub base_wpm: u32,
    /// Pause between entries during a read-through
    pub pause_ms: u64,
    pub pacing: Pacing,
    /// How often the voice list is polled for changes
    pub voice_refresh_ms: u64,
}

impl SpeechConfig {
    pub fn new() -> Self {
        let program = env::var("KHAMSAP_TTS_PROGRAM").unwrap_or_else(|_| default_program());

        let voice_refresh_ms = env::var("KHAMSAP_VOICE_REFRESH_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_voice_refresh_ms);

        Self {
            program,
            rate: default_rate(),
            base_wpm: default_base_wpm(),
            pause_ms: default_pause_ms(),
            pacing: Pacing::default(),
            voice_refresh_ms,
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn voice_refresh(&self) -> Duration {
        // a zero interval would make tokio::time::interval panic
        Duration::from_millis(self.voice_refresh_ms.max(1))
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self::new()
    }
}
