//! Visible-set derivation: topic restriction intersected with substring search.
//!
//! Everything here is pure. The host calls [`compute_visible`] on every
//! keystroke and topic click; nothing is cached between calls.

use khamsap_types::{Entry, TopicLabel};

use crate::preprocess::{Preprocessor, SearchPreprocessor};

/// A normalized search needle. Empty means "match everything".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: SearchPreprocessor.process(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Substring match against the lower-cased `zh`, `th`, `rtgs` and `cat` fields.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.is_empty() {
            return true;
        }

        let needle = self.needle.as_str();
        entry.zh.to_lowercase().contains(needle)
            || entry.th.to_lowercase().contains(needle)
            || entry.rtgs.to_lowercase().contains(needle)
            || entry
                .cat
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(needle)
    }
}

/// Topic restriction, exact and case-sensitive since topics come from the data.
fn in_topic(entry: &Entry, topic: &TopicLabel) -> bool {
    match topic {
        TopicLabel::All => true,
        TopicLabel::Named(name) => entry.cat.as_deref() == Some(name.as_str()),
    }
}

/// Entries visible under `topic` and `search_text`, in store order.
pub fn compute_visible<'a>(
    entries: &'a [Entry],
    topic: &TopicLabel,
    search_text: &str,
) -> Vec<&'a Entry> {
    let query = SearchQuery::new(search_text);

    let visible: Vec<&Entry> = entries
        .iter()
        .filter(|entry| in_topic(entry, topic))
        .filter(|entry| query.matches(entry))
        .collect();

    tracing::debug!(
        topic = %topic,
        query = query.as_str(),
        total = entries.len(),
        visible = visible.len(),
        "Recomputed visible entries"
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;

    fn named(topic: &str) -> TopicLabel {
        TopicLabel::Named(topic.to_string())
    }

    #[test]
    fn all_with_empty_search_is_identity() {
        let entries = sample();
        let visible = compute_visible(&entries, &TopicLabel::All, "");
        let expected: Vec<&Entry> = entries.iter().collect();
        assert_eq!(visible, expected);
    }

    #[test]
    fn whitespace_search_is_treated_as_empty() {
        let entries = sample();
        assert_eq!(compute_visible(&entries, &TopicLabel::All, "   ").len(), 3);
    }

    #[test]
    fn topic_keeps_only_matching_entries_in_order() {
        let entries = sample();
        let visible = compute_visible(&entries, &named("greetings"), "");
        assert_eq!(visible, vec![&entries[0], &entries[1]]);
    }

    #[test]
    fn topic_match_is_case_sensitive() {
        let entries = sample();
        assert!(compute_visible(&entries, &named("Greetings"), "").is_empty());
    }

    #[test]
    fn unknown_topic_yields_empty() {
        let entries = sample();
        assert!(compute_visible(&entries, &named("travel"), "").is_empty());
    }

    #[test]
    fn search_matches_romanization() {
        let entries = sample();
        let visible = compute_visible(&entries, &TopicLabel::All, "nam");
        assert_eq!(visible, vec![&entries[2]]);
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let entries = sample();
        let visible = compute_visible(&entries, &TopicLabel::All, "  KHOB ");
        assert_eq!(visible, vec![&entries[1]]);
    }

    #[test]
    fn search_matches_topic_and_thai_fields() {
        let entries = sample();
        assert_eq!(
            compute_visible(&entries, &TopicLabel::All, "FOOD"),
            vec![&entries[2]]
        );
        assert_eq!(
            compute_visible(&entries, &TopicLabel::All, "ขอบ"),
            vec![&entries[1]]
        );
        assert_eq!(
            compute_visible(&entries, &TopicLabel::All, "你"),
            vec![&entries[0]]
        );
    }

    #[test]
    fn entries_without_cat_match_only_on_other_fields() {
        let entries = vec![
            Entry::new("貓", "แมว", "maeo", None),
            Entry::new("狗", "หมา", "ma", Some("animals")),
        ];
        assert_eq!(
            compute_visible(&entries, &TopicLabel::All, "ani"),
            vec![&entries[1]]
        );
        assert_eq!(
            compute_visible(&entries, &TopicLabel::All, "ma"),
            vec![&entries[0], &entries[1]]
        );
        assert_eq!(
            compute_visible(&entries, &named("animals"), "ma"),
            vec![&entries[1]]
        );
    }

    #[test]
    fn topic_and_search_intersect() {
        let entries = sample();
        assert_eq!(
            compute_visible(&entries, &named("greetings"), "sawat"),
            vec![&entries[0]]
        );
        assert!(compute_visible(&entries, &named("greetings"), "nam").is_empty());
    }

    #[test]
    fn repeated_calls_agree() {
        let entries = sample();
        let first = compute_visible(&entries, &named("greetings"), "k");
        let second = compute_visible(&entries, &named("greetings"), "k");
        assert_eq!(first, second);
    }

    #[test]
    fn included_and_excluded_entries_split_on_the_four_fields() {
        let entries = vec![
            Entry::new("早安", "อรุณสวัสดิ์", "arun sawat", Some("Greetings")),
            Entry::new("米飯", "ข้าว", "khao", Some("food")),
            Entry::new("白", "ขาว", "KHAO", None),
            Entry::new("山", "ภูเขา", "phukhao", Some("nature")),
        ];

        for raw in ["khao", "SAWAT", "greet", "ข", "z", "o"] {
            let visible = compute_visible(&entries, &TopicLabel::All, raw);
            let query = SearchQuery::new(raw);
            for entry in &entries {
                let hit = [
                    entry.zh.as_str(),
                    entry.th.as_str(),
                    entry.rtgs.as_str(),
                    entry.cat.as_deref().unwrap_or(""),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(query.as_str()));
                assert_eq!(visible.contains(&entry), hit, "query {raw:?} entry {entry:?}");
            }
        }
    }
}
