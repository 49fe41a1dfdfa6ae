use kanal::AsyncSender;
use khamsap_io::{DataSource, load_entries_or_empty};
use khamsap_lang_thai::contains_thai;
use khamsap_types::{AppEvent, TopicLabel};

use super::{send_notice, visible_rows};
use crate::state::AppState;

/// Load (or reload) the entry list and redraw everything that derives from it.
///
/// A failed load leaves an empty list behind; the browser keeps running.
pub async fn handle_load(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let source = {
        let config = state.config.read().await;
        DataSource::parse(&config.data.source)
    };

    let store = load_entries_or_empty(&source).await;
    let without_script = store.iter().filter(|entry| !contains_thai(&entry.th)).count();
    if without_script > 0 {
        tracing::warn!(
            "{} of {} entries have no Thai script in their th field",
            without_script,
            store.len()
        );
    }

    let (count, dropped_topic, badges, rows) = {
        let mut session = state.session.write().await;
        session.replace_store(store);

        let active = session.filter().active_topic.clone();
        let dropped_topic = if session.topics().contains(&active) {
            None
        } else {
            session.set_topic(TopicLabel::All);
            Some(active)
        };

        (
            session.store().len(),
            dropped_topic,
            session.topic_badges(),
            visible_rows(&session),
        )
    };

    app_to_ui_tx
        .send(AppEvent::DataLoaded {
            count,
            source: source.to_string(),
        })
        .await?;
    if let Some(topic) = dropped_topic {
        send_notice(app_to_ui_tx, format!("Topic '{topic}' not found, showing all")).await?;
    }
    app_to_ui_tx.send(AppEvent::ShowTopics(badges)).await?;
    app_to_ui_tx.send(AppEvent::ShowRows(rows)).await?;

    Ok(())
}
