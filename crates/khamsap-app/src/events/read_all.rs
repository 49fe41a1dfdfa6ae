use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use khamsap_speech::{PlaybackError, PlaybackEvent, PlaybackOutcome, StartOutcome};
use khamsap_types::{AppEvent, ReadControl};
use tokio_util::sync::CancellationToken;

use super::send_notice;
use crate::state::AppState;

/// The read control: starts a read-through of the visible rows, or stops the
/// one already running.
pub async fn handle_toggle_read(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let services = match state.speech.require() {
        Ok(services) => services,
        Err(Some(notice)) => return send_notice(app_to_ui_tx, notice).await,
        Err(None) => return Ok(()),
    };

    let queue = state.session.read().await.reading_queue();
    match services.playback.start(queue) {
        Ok(StartOutcome::Started { generation }) => {
            tracing::debug!(generation, "Read-through started");
            app_to_ui_tx
                .send(AppEvent::ReadControl(ReadControl::Stop))
                .await?;
        }
        Ok(StartOutcome::Stopped) => {
            app_to_ui_tx
                .send(AppEvent::ReadControl(ReadControl::Play))
                .await?;
        }
        Err(PlaybackError::EmptyQueue) => {
            tracing::debug!("Read requested with no visible rows");
            send_notice(app_to_ui_tx, "Nothing to read").await?;
        }
    }

    Ok(())
}

pub async fn handle_stop_read(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(services) = state.speech.services() else {
        return Ok(());
    };

    let stopped = services.playback.cancel();
    // also cuts off a single-entry speak
    services.speaker.channel().silence();
    if stopped {
        app_to_ui_tx
            .send(AppEvent::ReadControl(ReadControl::Play))
            .await?;
    }
    Ok(())
}

/// Turns playback events into read-control updates.
///
/// A finished session only resets the control when no newer session has
/// started in the meantime.
pub async fn forward_playback_events(
    state: Arc<AppState>,
    events: AsyncReceiver<PlaybackEvent>,
    cancel: CancellationToken,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            event = events.recv() => match event {
                Ok(event) => event,
                Err(_) => return Ok(()),
            },
        };

        match event {
            PlaybackEvent::Started { generation, total } => {
                tracing::debug!(generation, total, "Playback started");
            }
            PlaybackEvent::Advanced { generation, index } => {
                tracing::trace!(generation, index, "Playback advanced");
            }
            PlaybackEvent::Finished {
                generation,
                outcome,
            } => {
                tracing::debug!(generation, ?outcome, "Playback finished");
                if let PlaybackOutcome::Failed(reason) = &outcome {
                    send_notice(&app_to_ui_tx, format!("Reading stopped: {reason}")).await?;
                }

                let speaking = state
                    .speech
                    .services()
                    .is_some_and(|services| services.playback.is_speaking());
                if !speaking {
                    app_to_ui_tx
                        .send(AppEvent::ReadControl(ReadControl::Play))
                        .await?;
                }
            }
        }
    }
}
