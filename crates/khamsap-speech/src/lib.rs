//! Speech output for the vocabulary browser.
//!
//! - [`voice`]: voice descriptions and the language-preference selector.
//! - [`device`]: the async device interface, with a command-line synthesizer
//!   and an in-memory recorder in [`devices`].
//! - [`channel`]: the shared device handle that cancels before it speaks.
//! - [`speaker`]: utterance construction and single-entry speak.
//! - [`playback`]: the single-flight sequential read-through.

pub mod channel;
pub mod device;
pub mod devices;
pub mod error;
pub mod playback;
pub mod speaker;
pub mod voice;

pub use channel::SpeechChannel;
pub use device::{SpeechDevice, Utterance};
pub use devices::{CommandDevice, DeviceCall, RecordingDevice};
pub use error::{PlaybackError, SpeechError};
pub use playback::{
    PlaybackController, PlaybackEvent, PlaybackOutcome, PlaybackState, StartOutcome,
};
pub use speaker::Speaker;
pub use voice::{Voice, VoiceList, VoicePreference, select_voice};

/// Speaking rate relative to normal used for every utterance
pub const DEFAULT_RATE: f32 = 0.92;
