use std::sync::Arc;
use std::time::Duration;

use khamsap_speech::{DeviceCall, RecordingDevice, SpeechDevice};
use khamsap_types::{AppEvent, ReadControl};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::events::filter::handle_search;
use crate::events::read_all::{forward_playback_events, handle_stop_read, handle_toggle_read};

fn controls(events: &[AppEvent]) -> Vec<ReadControl> {
    events
        .iter()
        .filter_map(|event| match event {
            AppEvent::ReadControl(control) => Some(*control),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn empty_list_has_nothing_to_read() {
    let (state, _events) = speaking_state(Arc::new(RecordingDevice::new())).await;
    let (tx, rx) = kanal::unbounded_async();

    handle_search(&state, &tx, "no such word".to_string())
        .await
        .unwrap();
    handle_toggle_read(&state, &tx).await.unwrap();

    let events = drain(&rx);
    assert_eq!(notices(&events), vec!["Nothing to read"]);
    assert!(controls(&events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn read_control_toggles() {
    let device = Arc::new(RecordingDevice::new());
    let (state, _events) = speaking_state(device.clone()).await;
    let (tx, rx) = kanal::unbounded_async();

    handle_toggle_read(&state, &tx).await.unwrap();
    timeout(Duration::from_secs(1), device.wait_for_spoken(1))
        .await
        .unwrap();
    handle_toggle_read(&state, &tx).await.unwrap();

    assert_eq!(
        controls(&drain(&rx)),
        vec![ReadControl::Stop, ReadControl::Play]
    );
    assert!(!state.speech.services().unwrap().playback.is_speaking());
}

#[tokio::test(start_paused = true)]
async fn stop_without_session_still_silences() {
    let device = Arc::new(RecordingDevice::new());
    let (state, _events) = speaking_state(device.clone()).await;
    let (tx, rx) = kanal::unbounded_async();

    handle_stop_read(&state, &tx).await.unwrap();
    assert!(drain(&rx).is_empty());
    assert_eq!(device.calls(), vec![DeviceCall::Cancel]);
}

#[tokio::test(start_paused = true)]
async fn control_stays_stop_while_the_device_is_speaking() {
    let device = Arc::new(RecordingDevice::new().with_speak_time(Duration::from_secs(2)));
    let (state, playback_events) = speaking_state(device.clone()).await;
    let (tx, rx) = kanal::unbounded_async();
    let cancel = CancellationToken::new();

    let forwarder = tokio::spawn(forward_playback_events(
        state.clone(),
        playback_events,
        cancel.clone(),
        tx.clone(),
    ));

    handle_toggle_read(&state, &tx).await.unwrap();
    timeout(Duration::from_secs(1), device.wait_for_spoken(3))
        .await
        .unwrap();
    // every entry is queued, the device is still busy with them
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(state.speech.services().unwrap().playback.is_speaking());
    assert_eq!(controls(&drain(&rx)), vec![ReadControl::Stop]);

    handle_stop_read(&state, &tx).await.unwrap();
    assert_eq!(device.calls().last(), Some(&DeviceCall::Cancel));
    timeout(Duration::from_millis(10), device.wait_idle())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    cancel.cancel();
    forwarder.await.unwrap().unwrap();
    assert_eq!(controls(&drain(&rx)), vec![ReadControl::Play, ReadControl::Play]);
    assert!(!state.speech.services().unwrap().playback.is_speaking());
}

#[tokio::test(start_paused = true)]
async fn read_with_empty_list_during_a_session_stops_it() {
    let device = Arc::new(RecordingDevice::new());
    let (state, _events) = speaking_state(device.clone()).await;
    let (tx, rx) = kanal::unbounded_async();

    handle_toggle_read(&state, &tx).await.unwrap();
    timeout(Duration::from_secs(1), device.wait_for_spoken(1))
        .await
        .unwrap();
    handle_search(&state, &tx, "no such word".to_string())
        .await
        .unwrap();
    handle_toggle_read(&state, &tx).await.unwrap();

    let events = drain(&rx);
    assert!(notices(&events).is_empty());
    assert_eq!(controls(&events), vec![ReadControl::Stop, ReadControl::Play]);
    assert!(!state.speech.services().unwrap().playback.is_speaking());
}

#[tokio::test(start_paused = true)]
async fn finished_read_through_resets_control() {
    let device = Arc::new(RecordingDevice::new());
    let (state, playback_events) = speaking_state(device.clone()).await;
    let (tx, rx) = kanal::unbounded_async();
    let cancel = CancellationToken::new();

    let forwarder = tokio::spawn(forward_playback_events(
        state.clone(),
        playback_events,
        cancel.clone(),
        tx.clone(),
    ));

    handle_toggle_read(&state, &tx).await.unwrap();
    timeout(Duration::from_secs(5), async {
        while state.speech.services().unwrap().playback.is_speaking() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .unwrap();
    // let the forwarder handle the final event
    tokio::time::sleep(Duration::from_millis(10)).await;

    cancel.cancel();
    forwarder.await.unwrap().unwrap();

    assert_eq!(device.spoken(), vec!["สวัสดี", "ขอบคุณ", "น้ำ"]);
    assert_eq!(
        controls(&drain(&rx)),
        vec![ReadControl::Stop, ReadControl::Play]
    );
}
