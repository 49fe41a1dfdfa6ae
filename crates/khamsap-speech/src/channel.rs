use std::sync::Arc;

use crate::device::{SpeechDevice, Utterance};
use crate::error::SpeechError;
use crate::voice::Voice;

/// Shared handle on the single speech device.
///
/// Every path that starts new speech goes through [`SpeechChannel::interrupt_and_speak`],
/// which silences whatever is pending first. Only a read-through that already
/// owns the device appends with [`SpeechChannel::speak_after`].
#[derive(Clone)]
pub struct SpeechChannel {
    device: Arc<dyn SpeechDevice>,
}

impl SpeechChannel {
    pub fn new(device: Arc<dyn SpeechDevice>) -> Self {
        Self { device }
    }

    pub fn device_name(&self) -> &str {
        self.device.name()
    }

    pub async fn interrupt_and_speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        self.device.cancel();
        tracing::debug!(device = self.device.name(), text = %utterance.text, "Speaking");
        self.device.enqueue(utterance).await
    }

    pub async fn speak_after(&self, utterance: Utterance) -> Result<(), SpeechError> {
        tracing::debug!(device = self.device.name(), text = %utterance.text, "Queueing");
        self.device.enqueue(utterance).await
    }

    pub fn silence(&self) {
        self.device.cancel();
    }

    pub async fn wait_idle(&self) {
        self.device.wait_idle().await
    }

    pub async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        self.device.voices().await
    }
}
