use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::device::{SpeechDevice, Utterance};
use crate::error::SpeechError;
use crate::voice::Voice;

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Speak(Utterance),
    Cancel,
}

/// In-memory device: records calls instead of producing audio.
///
/// Backs `--dry-run`. Each utterance "plays" for `speak_time`, which only
/// matters to [`SpeechDevice::wait_idle`].
pub struct RecordingDevice {
    voices: Mutex<Vec<Voice>>,
    calls: Mutex<Vec<DeviceCall>>,
    speak_time: Duration,
    busy_until: Mutex<Option<Instant>>,
    spoke: Notify,
    echo: bool,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self {
            voices: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            speak_time: Duration::ZERO,
            busy_until: Mutex::new(None),
            spoke: Notify::new(),
            echo: false,
        }
    }

    pub fn with_voices(self, voices: Vec<Voice>) -> Self {
        self.set_voices(voices);
        self
    }

    pub fn with_speak_time(mut self, speak_time: Duration) -> Self {
        self.speak_time = speak_time;
        self
    }

    /// Log every utterance at info level
    pub fn echo(mut self) -> Self {
        self.echo = true;
        self
    }

    fn set_voices(&self, voices: Vec<Voice>) {
        *self.voices.lock().unwrap_or_else(PoisonError::into_inner) = voices;
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Text of every enqueued utterance, in order
    pub fn spoken(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DeviceCall::Speak(u) => Some(u.text),
                DeviceCall::Cancel => None,
            })
            .collect()
    }

    /// Wait until at least `count` utterances were enqueued
    pub async fn wait_for_spoken(&self, count: usize) {
        loop {
            let notified = self.spoke.notified();
            if self.spoken().len() >= count {
                return;
            }
            notified.await;
        }
    }

    fn record(&self, call: DeviceCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechDevice for RecordingDevice {
    fn name(&self) -> &str {
        "recording"
    }

    async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        Ok(self.voices.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    async fn enqueue(&self, utterance: Utterance) -> Result<(), SpeechError> {
        if self.echo {
            let voice = utterance.voice.as_ref().map(|v| v.name.as_str()).unwrap_or("default");
            tracing::info!(voice, rate = utterance.rate, "🔊 {}", utterance.text);
        }

        {
            let mut busy = self.busy_until.lock().unwrap_or_else(PoisonError::into_inner);
            let start = busy.map_or_else(Instant::now, |until| until.max(Instant::now()));
            *busy = Some(start + self.speak_time);
        }

        self.record(DeviceCall::Speak(utterance));
        self.spoke.notify_waiters();
        Ok(())
    }

    fn cancel(&self) {
        *self.busy_until.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.record(DeviceCall::Cancel);
    }

    async fn wait_idle(&self) {
        loop {
            let until = *self.busy_until.lock().unwrap_or_else(PoisonError::into_inner);
            match until {
                Some(until) if until > Instant::now() => tokio::time::sleep_until(until).await,
                _ => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            voice: None,
            rate: 1.0,
            language: "th".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn wait_idle_covers_queued_utterances() {
        let device = RecordingDevice::new().with_speak_time(Duration::from_secs(1));
        let started = Instant::now();

        device.enqueue(utterance("หนึ่ง")).await.unwrap();
        device.enqueue(utterance("สอง")).await.unwrap();
        device.wait_idle().await;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(device.spoken(), vec!["หนึ่ง", "สอง"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_makes_device_idle() {
        let device = RecordingDevice::new().with_speak_time(Duration::from_secs(5));
        let started = Instant::now();

        device.enqueue(utterance("หนึ่ง")).await.unwrap();
        device.cancel();
        device.wait_idle().await;

        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
