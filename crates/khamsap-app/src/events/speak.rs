use kanal::AsyncSender;
use khamsap_types::AppEvent;

use super::send_notice;
use crate::state::AppState;

/// Speak the Thai text of one visible row (zero-based).
pub async fn handle_speak_row(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    row: usize,
) -> anyhow::Result<()> {
    let text = {
        let session = state.session.read().await;
        session.visible().get(row).map(|entry| entry.th.clone())
    };

    let Some(text) = text else {
        return send_notice(app_to_ui_tx, format!("No row {}", row + 1)).await;
    };

    let services = match state.speech.require() {
        Ok(services) => services,
        Err(Some(notice)) => return send_notice(app_to_ui_tx, notice).await,
        Err(None) => return Ok(()),
    };

    tracing::debug!("Speaking row {}", row + 1);
    if let Err(e) = services.speaker.speak_one(&text).await {
        tracing::warn!("Failed to speak row {}: {}", row + 1, e);
        send_notice(app_to_ui_tx, format!("Could not speak: {e}")).await?;
    }

    Ok(())
}
