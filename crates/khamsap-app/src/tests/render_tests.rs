use khamsap_types::{AppEvent, EntryRow, ReadControl, TopicBadge, TopicLabel, VoiceRow};

use crate::ui::render;

#[test]
fn rows_are_numbered_from_one() {
    let lines = render(&AppEvent::ShowRows(vec![
        EntryRow {
            zh: "你好".to_string(),
            th: "สวัสดี".to_string(),
            rtgs: "sawatdee".to_string(),
        },
        EntryRow {
            zh: "水".to_string(),
            th: "น้ำ".to_string(),
            rtgs: "nam".to_string(),
        },
    ]));

    assert_eq!(lines, vec!["  1. 你好 | สวัสดี | sawatdee", "  2. 水 | น้ำ | nam"]);
}

#[test]
fn empty_rows_say_so() {
    assert_eq!(render(&AppEvent::ShowRows(Vec::new())), vec!["(no entries)"]);
}

#[test]
fn active_topic_is_marked() {
    let lines = render(&AppEvent::ShowTopics(vec![
        TopicBadge {
            label: TopicLabel::All,
            count: 3,
            active: false,
        },
        TopicBadge {
            label: TopicLabel::Named("food".to_string()),
            count: 1,
            active: true,
        },
    ]));

    assert_eq!(lines, vec!["topics:  ALL (3)  *food (1)"]);
}

#[test]
fn read_control_shows_label() {
    assert_eq!(
        render(&AppEvent::ReadControl(ReadControl::Stop)),
        vec!["[■ Stop] Stop reading"]
    );
    assert_eq!(
        render(&AppEvent::ReadControl(ReadControl::Play)),
        vec!["[▶ Read] Read the current filtered list aloud"]
    );
}

#[test]
fn voices_and_notices() {
    let lines = render(&AppEvent::ShowVoices(vec![VoiceRow {
        name: "thai".to_string(),
        lang: "th".to_string(),
        selected: true,
    }]));
    assert_eq!(lines, vec!["* thai [th]"]);
    assert_eq!(
        render(&AppEvent::ShowVoices(Vec::new())),
        vec!["(no voices, using the device default)"]
    );
    assert_eq!(
        render(&AppEvent::Notice("Nothing to read".to_string())),
        vec!["! Nothing to read"]
    );
}
