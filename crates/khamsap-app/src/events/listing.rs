use kanal::AsyncSender;
use khamsap_types::{AppEvent, VoiceRow};

use super::send_notice;
use crate::state::AppState;

pub async fn handle_list_topics(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let badges = state.session.read().await.topic_badges();
    app_to_ui_tx.send(AppEvent::ShowTopics(badges)).await?;
    Ok(())
}

/// Show the voices the synthesizer reported, marking the one speech uses.
pub async fn handle_list_voices(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let services = match state.speech.require() {
        Ok(services) => services,
        Err(Some(notice)) => return send_notice(app_to_ui_tx, notice).await,
        Err(None) => return Ok(()),
    };

    let selected = services.speaker.selected_voice();
    let rows = services
        .speaker
        .voices()
        .snapshot()
        .into_iter()
        .map(|voice| VoiceRow {
            selected: selected.as_ref().is_some_and(|s| s.id == voice.id),
            name: voice.name,
            lang: voice.lang,
        })
        .collect();

    app_to_ui_tx.send(AppEvent::ShowVoices(rows)).await?;
    Ok(())
}
