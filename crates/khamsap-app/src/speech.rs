use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kanal::AsyncReceiver;
use khamsap_config::speech::SpeechConfig;
use khamsap_core::Language;
use khamsap_speech::{
    CommandDevice, PlaybackController, PlaybackEvent, RecordingDevice, Speaker, SpeechChannel,
    SpeechDevice, SpeechError, Voice, VoiceList, VoicePreference,
};

/// Open the synthesizer named in the config, or the recording device for dry runs.
pub async fn open_device(
    config: &SpeechConfig,
    dry_run: bool,
) -> Result<Arc<dyn SpeechDevice>, SpeechError> {
    if dry_run {
        tracing::info!("Dry run: utterances are logged, not spoken");
        return Ok(Arc::new(dry_run_device()));
    }

    let device = CommandDevice::detect(&config.program, config.base_wpm).await?;
    Ok(Arc::new(device))
}

/// Recording device with a Thai and an English voice, so voice listing and
/// selection behave as they would with a real synthesizer.
pub fn dry_run_device() -> RecordingDevice {
    RecordingDevice::new()
        .with_voices(vec![
            Voice::new("en-us", "English (America)", "en-US"),
            Voice::new("th", "Thai", "th-TH"),
        ])
        .echo()
}

pub struct SpeechServices {
    pub speaker: Arc<Speaker>,
    pub playback: PlaybackController,
}

/// Speech availability for the session.
///
/// When no synthesizer exists the rest of the app keeps working; the first
/// speech request gets a notice, later ones are only logged.
pub struct SpeechState {
    services: Option<SpeechServices>,
    unsupported: Option<String>,
    notice_shown: AtomicBool,
}

impl SpeechState {
    pub fn available(
        device: Arc<dyn SpeechDevice>,
        config: &SpeechConfig,
        language: &dyn Language,
    ) -> (Self, AsyncReceiver<PlaybackEvent>) {
        let preference = VoicePreference::for_language(language);
        tracing::debug!("Voice preference for {}: {:?}", language.display_name(), preference);

        let speaker = Arc::new(Speaker::new(
            SpeechChannel::new(device),
            VoiceList::new(),
            preference,
            config.rate,
        ));
        tracing::info!("Speech device: {}", speaker.channel().device_name());

        let (events_tx, events_rx) = kanal::unbounded_async();
        let playback = PlaybackController::new(
            Arc::clone(&speaker),
            config.pause(),
            config.pacing,
            events_tx,
        );

        let state = Self {
            services: Some(SpeechServices { speaker, playback }),
            unsupported: None,
            notice_shown: AtomicBool::new(false),
        };
        (state, events_rx)
    }

    pub fn unsupported(reason: String) -> Self {
        tracing::warn!("Speech synthesis unavailable: {}", reason);
        Self {
            services: None,
            unsupported: Some(reason),
            notice_shown: AtomicBool::new(false),
        }
    }

    pub fn services(&self) -> Option<&SpeechServices> {
        self.services.as_ref()
    }

    /// The speech services, or `Err(Some(notice))` the first time they are
    /// missing and `Err(None)` after that.
    pub fn require(&self) -> Result<&SpeechServices, Option<String>> {
        if let Some(services) = &self.services {
            return Ok(services);
        }

        let reason = self.unsupported.as_deref().unwrap_or("no synthesizer");
        tracing::debug!("Speech requested but unavailable: {}", reason);
        if self.notice_shown.swap(true, Ordering::AcqRel) {
            Err(None)
        } else {
            Err(Some(format!(
                "Speech synthesis is not supported here ({reason})"
            )))
        }
    }
}
