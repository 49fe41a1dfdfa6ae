use crate::channel::SpeechChannel;
use crate::device::Utterance;
use crate::error::SpeechError;
use crate::voice::{Voice, VoiceList, VoicePreference, select_voice};

/// Turns entry text into utterances and speaks single entries.
///
/// The voice is chosen again for every utterance from the current [`VoiceList`].
pub struct Speaker {
    channel: SpeechChannel,
    voices: VoiceList,
    preference: VoicePreference,
    rate: f32,
}

impl Speaker {
    pub fn new(
        channel: SpeechChannel,
        voices: VoiceList,
        preference: VoicePreference,
        rate: f32,
    ) -> Self {
        Self {
            channel,
            voices,
            preference,
            rate,
        }
    }

    pub fn channel(&self) -> &SpeechChannel {
        &self.channel
    }

    pub fn voices(&self) -> &VoiceList {
        &self.voices
    }

    pub fn selected_voice(&self) -> Option<Voice> {
        let voices = self.voices.snapshot();
        select_voice(&voices, &self.preference).cloned()
    }

    pub fn utterance(&self, text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            voice: self.selected_voice(),
            rate: self.rate,
            language: self.preference.language.clone(),
        }
    }

    /// Speak one entry right away, cutting off anything still pending on the device.
    ///
    /// Independent of any read-through session; an active one is audibly
    /// interrupted but keeps its own state.
    pub async fn speak_one(&self, text: &str) -> Result<(), SpeechError> {
        self.channel.interrupt_and_speak(self.utterance(text)).await
    }
}
