use async_trait::async_trait;

use crate::error::SpeechError;
use crate::voice::Voice;

/// One speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` means the device default voice
    pub voice: Option<Voice>,
    pub rate: f32,
    pub language: String,
}

/// A speech synthesizer with a single output.
///
/// Utterances play one after another in enqueue order.
#[async_trait]
pub trait SpeechDevice: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Voices the device can currently speak with. May be empty early on.
    async fn voices(&self) -> Result<Vec<Voice>, SpeechError>;

    /// Queue an utterance. Resolves once the request is dispatched, not when it
    /// has been heard.
    async fn enqueue(&self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Drop everything queued and stop the current utterance.
    fn cancel(&self);

    /// Resolves when nothing is queued or speaking.
    async fn wait_idle(&self);
}
