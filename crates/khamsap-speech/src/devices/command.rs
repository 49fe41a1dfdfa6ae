//! espeak-ng compatible synthesizer driven as a child process.

use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::device::{SpeechDevice, Utterance};
use crate::error::SpeechError;
use crate::voice::Voice;

const MIN_WPM: u32 = 80;
const MAX_WPM: u32 = 450;

struct Job {
    epoch: u64,
    utterance: Utterance,
}

/// Cancellation generation shared between the device handle and its worker.
/// Epoch and token change together under one lock.
struct Shared {
    current: Mutex<(u64, CancellationToken)>,
    pending: AtomicUsize,
    idle: Notify,
}

impl Shared {
    fn epoch(&self) -> u64 {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).0
    }

    /// Token for a job, or `None` when the job was queued before a cancel
    fn token_for(&self, epoch: u64) -> Option<CancellationToken> {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        (current.0 == epoch).then(|| current.1.clone())
    }

    fn cancel(&self) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.1.cancel();
        *current = (current.0 + 1, CancellationToken::new());
    }

    fn finish_one(&self) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }
}

pub struct CommandDevice {
    program: String,
    jobs: AsyncSender<Job>,
    shared: Arc<Shared>,
}

impl CommandDevice {
    /// Probe `program --version` and start the playback worker.
    ///
    /// Fails with [`SpeechError::Unsupported`] when the program cannot be run.
    pub async fn detect(program: &str, base_wpm: u32) -> Result<Self, SpeechError> {
        let probe = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        match probe {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                tracing::info!("Using synthesizer {}: {}", program, version.trim());
            }
            Ok(output) => {
                return Err(SpeechError::Unsupported(format!(
                    "{program} --version exited with {}",
                    output.status
                )));
            }
            Err(e) => {
                return Err(SpeechError::Unsupported(format!("{program}: {e}")));
            }
        }

        let (jobs, rx) = kanal::unbounded_async();
        let shared = Arc::new(Shared {
            current: Mutex::new((0, CancellationToken::new())),
            pending: AtomicUsize::new(0),
            idle: Notify::new(),
        });

        tokio::spawn(run_worker(
            program.to_string(),
            base_wpm,
            rx,
            Arc::clone(&shared),
        ));

        Ok(Self {
            program: program.to_string(),
            jobs,
            shared,
        })
    }
}

/// Map a relative rate onto the synthesizer's words-per-minute scale.
pub fn words_per_minute(base_wpm: u32, rate: f32) -> u32 {
    let wpm = (base_wpm as f32 * rate).round();
    if !wpm.is_finite() || wpm <= 0.0 {
        return MIN_WPM.max(base_wpm.min(MAX_WPM));
    }
    (wpm as u32).clamp(MIN_WPM, MAX_WPM)
}

/// Parse `espeak-ng --voices` output.
///
/// Columns: priority, language, age/gender, voice name, file, other languages.
pub fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let mut columns = line.split_whitespace();
            let _priority = columns.next()?;
            let lang = columns.next()?;
            let _age_gender = columns.next()?;
            let name = columns.next()?;
            Some(Voice::new(lang, &name.replace('_', " "), lang))
        })
        .collect()
}

async fn run_worker(
    program: String,
    base_wpm: u32,
    jobs: AsyncReceiver<Job>,
    shared: Arc<Shared>,
) {
    while let Ok(job) = jobs.recv().await {
        if let Some(token) = shared.token_for(job.epoch) {
            if let Err(e) = speak(&program, base_wpm, &job.utterance, &token).await {
                tracing::warn!("Synthesizer failed on '{}': {}", job.utterance.text, e);
            }
        } else {
            tracing::trace!("Dropping utterance queued before cancel");
        }
        shared.finish_one();
    }
    tracing::debug!("Synthesizer worker stopped");
}

async fn speak(
    program: &str,
    base_wpm: u32,
    utterance: &Utterance,
    token: &CancellationToken,
) -> Result<(), SpeechError> {
    let mut command = Command::new(program);
    if let Some(voice) = &utterance.voice {
        command.arg("-v").arg(&voice.id);
    }
    command
        .arg("-s")
        .arg(words_per_minute(base_wpm, utterance.rate).to_string())
        .arg("--stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let mut child = command.spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(utterance.text.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
    }

    let status = tokio::select! {
        status = child.wait() => Some(status?),
        _ = token.cancelled() => None,
    };

    match status {
        Some(status) if !status.success() => {
            Err(SpeechError::Device(format!("{program} exited with {status}")))
        }
        Some(_) => Ok(()),
        None => {
            tracing::debug!("Stopping synthesizer mid-utterance");
            child.kill().await?;
            Ok(())
        }
    }
}

#[async_trait]
impl SpeechDevice for CommandDevice {
    fn name(&self) -> &str {
        &self.program
    }

    async fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(SpeechError::Device(format!(
                "{} --voices exited with {}",
                self.program, output.status
            )));
        }

        Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn enqueue(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let job = Job {
            epoch: self.shared.epoch(),
            utterance,
        };
        self.shared.pending.fetch_add(1, Ordering::AcqRel);
        if let Err(e) = self.jobs.send(job).await {
            self.shared.finish_one();
            return Err(SpeechError::Device(format!("synthesizer worker gone: {e}")));
        }
        Ok(())
    }

    fn cancel(&self) {
        self.shared.cancel();
    }

    async fn wait_idle(&self) {
        loop {
            let notified = self.shared.idle.notified();
            if self.shared.pending.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }
}
