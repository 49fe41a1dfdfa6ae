use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use khamsap_core::VocabularySession;
use khamsap_types::{AppEvent, EntryRow, UiEvent};

use crate::state::AppState;

pub mod filter;
pub mod listing;
pub mod load;
pub mod read_all;
pub mod speak;

use filter::{handle_search, handle_topic};
use listing::{handle_list_topics, handle_list_voices};
use load::handle_load;
use read_all::{handle_stop_read, handle_toggle_read};
use speak::handle_speak_row;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    handle_load(&state, &app_to_ui_tx).await?;
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::debug!("Event loop waiting for events");
    loop {
        let Ok(event) = ui_to_app_rx.recv().await else {
            tracing::info!("UI channel closed, leaving event loop");
            return Ok(());
        };

        tracing::debug!("Event received: {:?}", event);
        match event {
            AppEvent::UiEvent(UiEvent::Close) => {
                if let Some(services) = state.speech.services() {
                    services.playback.cancel();
                }
                tracing::info!("Close requested");
                return Ok(());
            }
            AppEvent::UiEvent(event) => handle_ui_event(&state, &app_to_ui_tx, event).await?,
            // display events only travel towards the UI
            _ => {}
        }
    }
}

async fn handle_ui_event(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: UiEvent,
) -> anyhow::Result<()> {
    match event {
        UiEvent::SearchText(text) => handle_search(state, app_to_ui_tx, text).await?,
        UiEvent::SelectTopic(topic) => handle_topic(state, app_to_ui_tx, topic).await?,
        UiEvent::SpeakRow(row) => handle_speak_row(state, app_to_ui_tx, row).await?,
        UiEvent::ToggleRead => handle_toggle_read(state, app_to_ui_tx).await?,
        UiEvent::StopRead => handle_stop_read(state, app_to_ui_tx).await?,
        UiEvent::ListTopics => handle_list_topics(state, app_to_ui_tx).await?,
        UiEvent::ListVoices => handle_list_voices(state, app_to_ui_tx).await?,
        UiEvent::Reload => handle_load(state, app_to_ui_tx).await?,
        UiEvent::Close => {}
    }

    Ok(())
}

pub(crate) fn visible_rows(session: &VocabularySession) -> Vec<EntryRow> {
    session
        .visible()
        .into_iter()
        .map(|entry| EntryRow {
            zh: entry.zh.clone(),
            th: entry.th.clone(),
            rtgs: entry.rtgs.clone(),
        })
        .collect()
}

pub(crate) async fn send_notice(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    notice: impl Into<String>,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::Notice(notice.into())).await?;
    Ok(())
}
