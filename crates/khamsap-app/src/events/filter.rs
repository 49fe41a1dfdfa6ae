use kanal::AsyncSender;
use khamsap_types::{AppEvent, TopicLabel};

use super::{send_notice, visible_rows};
use crate::state::AppState;

pub async fn handle_search(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    text: String,
) -> anyhow::Result<()> {
    let rows = {
        let mut session = state.session.write().await;
        session.set_search(text);
        visible_rows(&session)
    };

    tracing::debug!("Search matched {} rows", rows.len());
    app_to_ui_tx.send(AppEvent::ShowRows(rows)).await?;
    Ok(())
}

/// Switch the active topic. Labels that no entry carries are refused.
pub async fn handle_topic(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    topic: TopicLabel,
) -> anyhow::Result<()> {
    let update = {
        let mut session = state.session.write().await;
        if session.topics().contains(&topic) {
            session.set_topic(topic.clone());
            Some((session.topic_badges(), visible_rows(&session)))
        } else {
            None
        }
    };

    let Some((badges, rows)) = update else {
        tracing::debug!("Unknown topic requested: {}", topic);
        return send_notice(app_to_ui_tx, format!("No topic named '{topic}'")).await;
    };

    tracing::info!("Active topic: {}", topic);
    app_to_ui_tx.send(AppEvent::ShowTopics(badges)).await?;
    app_to_ui_tx.send(AppEvent::ShowRows(rows)).await?;
    Ok(())
}
