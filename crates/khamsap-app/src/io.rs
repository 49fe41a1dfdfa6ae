use std::sync::Arc;

use kanal::AsyncSender;
use khamsap_types::AppEvent;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Keeps the shared voice list in step with the device.
///
/// Voices can show up after startup (some synthesizers enumerate lazily), so
/// the list is polled rather than read once.
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(services) = state.speech.services() else {
        cancel.cancelled().await;
        return Ok(());
    };

    let refresh = state.config.read().await.speech.voice_refresh();
    let mut interval = tokio::time::interval(refresh);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Voice watcher stopped");
                return Ok(());
            }
            _ = interval.tick() => {}
        }

        let voices = match services.speaker.channel().voices().await {
            Ok(voices) => voices,
            Err(e) => {
                tracing::warn!("Failed to list voices: {}", e);
                continue;
            }
        };

        let count = voices.len();
        if services.speaker.voices().replace(voices) {
            let selected = services.speaker.selected_voice();
            tracing::info!(
                "Voice list changed: {} voices, using {}",
                count,
                selected
                    .as_ref()
                    .map_or("device default", |voice| voice.name.as_str())
            );
            event_tx.send(AppEvent::VoicesChanged { count }).await?;
        }
    }
}
