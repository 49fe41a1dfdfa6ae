/// Errors raised by speech devices.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech synthesis is not supported: {0}")]
    Unsupported(String),

    #[error("failed to run synthesizer: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("device error: {0}")]
    Device(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("nothing to read")]
    EmptyQueue,
}
