//! Sequential read-through of a list of texts.
//!
//! At most one session runs at a time. Every session gets a fresh generation;
//! the loop checks that its generation is still the active one before
//! dispatching, after dispatching and after the pause, so a cancelled loop
//! goes quiet at its next check and can never touch a newer session.
//! A session stays `Speaking` until the device has gone quiet, so stopping
//! it always has something to stop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use kanal::AsyncSender;
use khamsap_config::Pacing;
use tokio_util::sync::CancellationToken;

use crate::error::PlaybackError;
use crate::speaker::Speaker;

/// Pause between entries during a read-through
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Speaking {
        index: usize,
        generation: u64,
    },
}

impl PlaybackState {
    pub fn is_speaking(&self) -> bool {
        matches!(self, PlaybackState::Speaking { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Started { generation: u64, total: usize },
    Advanced { generation: u64, index: usize },
    Finished { generation: u64, outcome: PlaybackOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { generation: u64 },
    /// A session was already running; it was cancelled instead
    Stopped,
}

#[derive(Default)]
struct Session {
    state: PlaybackState,
    token: Option<CancellationToken>,
}

impl Session {
    /// Drop to idle, handing back the running session's token
    fn stop(&mut self) -> Option<CancellationToken> {
        self.state = PlaybackState::Idle;
        self.token.take()
    }
}

struct Inner {
    speaker: Arc<Speaker>,
    pause: Duration,
    pacing: Pacing,
    events: AsyncSender<PlaybackEvent>,
    session: Mutex<Session>,
    generations: AtomicU64,
}

/// Single-flight read-through controller. Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Inner>,
}

impl PlaybackController {
    pub fn new(
        speaker: Arc<Speaker>,
        pause: Duration,
        pacing: Pacing,
        events: AsyncSender<PlaybackEvent>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                speaker,
                pause,
                pacing,
                events,
                session: Mutex::new(Session::default()),
                generations: AtomicU64::new(0),
            }),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.inner.lock().state
    }

    pub fn is_speaking(&self) -> bool {
        self.state().is_speaking()
    }

    /// Start reading `queue`, or stop the running session.
    ///
    /// Must be called from within a tokio runtime; the loop runs as a spawned task.
    pub fn start(&self, queue: Vec<String>) -> Result<StartOutcome, PlaybackError> {
        let mut session = self.inner.lock();

        if session.state.is_speaking() {
            let token = session.stop();
            drop(session);
            self.inner.stop_device(token);
            tracing::info!("Read-through toggled off");
            return Ok(StartOutcome::Stopped);
        }

        if queue.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }

        let generation = self.inner.generations.fetch_add(1, Ordering::AcqRel) + 1;
        let token = CancellationToken::new();
        session.state = PlaybackState::Speaking {
            index: 0,
            generation,
        };
        session.token = Some(token.clone());
        drop(session);

        tracing::info!(generation, total = queue.len(), "Starting read-through");
        tokio::spawn(run_session(Arc::clone(&self.inner), generation, token, queue));

        Ok(StartOutcome::Started { generation })
    }

    /// Stop the running session. Returns false when there was nothing to stop.
    pub fn cancel(&self) -> bool {
        let mut session = self.inner.lock();
        let PlaybackState::Speaking { index, generation } = session.state else {
            return false;
        };
        let token = session.stop();
        drop(session);

        self.inner.stop_device(token);
        tracing::info!(generation, index, "Read-through cancelled");
        true
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stop_device(&self, token: Option<CancellationToken>) {
        if let Some(token) = token {
            token.cancel();
        }
        self.speaker.channel().silence();
    }

    /// Cancellation check. When `index` is given and the session is still ours,
    /// also publishes it as the current position.
    fn check(&self, generation: u64, index: Option<usize>) -> bool {
        let mut session = self.lock();
        let current = session.state;
        match current {
            PlaybackState::Speaking { generation: g, .. } if g == generation => {
                if let Some(index) = index {
                    session.state = PlaybackState::Speaking { index, generation };
                }
                true
            }
            _ => false,
        }
    }

    /// Back to idle, unless a newer session already took over
    fn finish(&self, generation: u64) {
        let mut session = self.lock();
        if matches!(session.state, PlaybackState::Speaking { generation: g, .. } if g == generation)
        {
            session.stop();
        }
    }

    fn emit(&self, event: PlaybackEvent) {
        match self.events.try_send(event) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("Playback event channel full, event dropped"),
            Err(e) => tracing::debug!("Playback event not delivered: {}", e),
        }
    }

    async fn pace(&self, token: &CancellationToken) {
        let wait = async {
            if self.pacing == Pacing::Completion {
                self.speaker.channel().wait_idle().await;
            }
            tokio::time::sleep(self.pause).await;
        };

        tokio::select! {
            _ = wait => {}
            _ = token.cancelled() => {}
        }
    }

    async fn speak_queue(
        &self,
        generation: u64,
        token: &CancellationToken,
        queue: &[String],
    ) -> PlaybackOutcome {
        for (index, text) in queue.iter().enumerate() {
            if !self.check(generation, Some(index)) {
                return PlaybackOutcome::Cancelled;
            }
            self.emit(PlaybackEvent::Advanced { generation, index });
            tracing::debug!(generation, index, "Reading entry");

            let utterance = self.speaker.utterance(text);
            let channel = self.speaker.channel();
            // the first entry takes over the device, the rest queue behind it
            let dispatched = if index == 0 {
                channel.interrupt_and_speak(utterance).await
            } else {
                channel.speak_after(utterance).await
            };
            if let Err(e) = dispatched {
                tracing::warn!(generation, index, "Read-through stopped: {}", e);
                return PlaybackOutcome::Failed(e.to_string());
            }

            if !self.check(generation, None) {
                return PlaybackOutcome::Cancelled;
            }

            self.pace(token).await;

            if !self.check(generation, None) {
                return PlaybackOutcome::Cancelled;
            }
        }

        // dispatch pacing leaves the tail of the queue playing on the device
        tokio::select! {
            _ = self.speaker.channel().wait_idle() => {}
            _ = token.cancelled() => {}
        }
        if !self.check(generation, None) {
            return PlaybackOutcome::Cancelled;
        }

        PlaybackOutcome::Completed
    }
}

async fn run_session(
    inner: Arc<Inner>,
    generation: u64,
    token: CancellationToken,
    queue: Vec<String>,
) {
    inner.emit(PlaybackEvent::Started {
        generation,
        total: queue.len(),
    });

    let outcome = inner.speak_queue(generation, &token, &queue).await;
    inner.finish(generation);

    tracing::info!(generation, ?outcome, "Read-through finished");
    inner.emit(PlaybackEvent::Finished {
        generation,
        outcome,
    });
}
