use std::path::PathBuf;
use std::sync::Arc;

use kanal::AsyncReceiver;
use khamsap_config::Config;
use khamsap_core::EntryStore;
use khamsap_lang_thai::ThaiLanguage;
use khamsap_speech::{PlaybackEvent, RecordingDevice, SpeechDevice};
use khamsap_types::{AppEvent, Entry};

use crate::speech::SpeechState;
use crate::state::AppState;

mod playback_flow_tests;
mod render_tests;

const SAMPLE_JSON: &str = r#"[
    {"zh": "你好", "th": "สวัสดี", "rtgs": "sawatdee", "cat": "greetings"},
    {"zh": "謝謝", "th": "ขอบคุณ", "rtgs": "khob khun", "cat": "greetings"},
    {"zh": "水", "th": " น้ำ ", "rtgs": "nam", "cat": "food"}
]"#;

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("你好", "สวัสดี", "sawatdee", Some("greetings")),
        Entry::new("謝謝", "ขอบคุณ", "khob khun", Some("greetings")),
        Entry::new("水", " น้ำ ", "nam", Some("food")),
    ]
}

fn write_data(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("khamsap-app-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn config_for(data: Option<&PathBuf>) -> Config {
    let mut config = Config::new();
    config.data.source = match data {
        Some(path) => path.display().to_string(),
        None => "does/not/exist.json".to_string(),
    };
    config
}

/// State backed by a recording device, with the sample entries already loaded
async fn speaking_state(
    device: Arc<RecordingDevice>,
) -> (Arc<AppState>, AsyncReceiver<PlaybackEvent>) {
    let config = config_for(None);
    let device: Arc<dyn SpeechDevice> = device;
    let (speech, events) = SpeechState::available(device, &config.speech, &ThaiLanguage);
    let state = Arc::new(AppState::new(config, speech));
    state
        .session
        .write()
        .await
        .replace_store(EntryStore::new(sample_entries()));
    (state, events)
}

/// Drain everything already queued on the UI side
fn drain(rx: &AsyncReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn notices(events: &[AppEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Notice(notice) => Some(notice.clone()),
            _ => None,
        })
        .collect()
}

fn last_rows(events: &[AppEvent]) -> Option<Vec<String>> {
    events.iter().rev().find_map(|event| match event {
        AppEvent::ShowRows(rows) => Some(rows.iter().map(|row| row.rtgs.clone()).collect()),
        _ => None,
    })
}
