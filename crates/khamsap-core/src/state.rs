use khamsap_types::{Entry, TopicBadge, TopicLabel};

use crate::filter::compute_visible;
use crate::store::EntryStore;
use crate::topics::TopicSummary;

/// Current topic and search text. Single values, no history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub active_topic: TopicLabel,
    /// Raw search text as typed; normalized when the visible set is derived
    pub search_text: String,
}

/// Everything the view needs for one session: the store, the filter state and
/// the topic summary derived from the store.
#[derive(Debug, Clone, Default)]
pub struct VocabularySession {
    store: EntryStore,
    filter: FilterState,
    topics: TopicSummary,
}

impl VocabularySession {
    pub fn new(store: EntryStore) -> Self {
        let topics = TopicSummary::build(store.entries());
        Self {
            store,
            filter: FilterState::default(),
            topics,
        }
    }

    /// Swap in a freshly loaded store; the topic summary is rebuilt from it.
    pub fn replace_store(&mut self, store: EntryStore) {
        self.topics = TopicSummary::build(store.entries());
        self.store = store;
        tracing::info!(
            entries = self.store.len(),
            topics = self.topics.topics().len() - 1,
            "Entry store replaced"
        );
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn topics(&self) -> &TopicSummary {
        &self.topics
    }

    pub fn set_topic(&mut self, topic: TopicLabel) {
        self.filter.active_topic = topic;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
    }

    pub fn visible(&self) -> Vec<&Entry> {
        compute_visible(
            self.store.entries(),
            &self.filter.active_topic,
            &self.filter.search_text,
        )
    }

    /// Thai text of every visible entry, trimmed, in display order
    pub fn reading_queue(&self) -> Vec<String> {
        self.visible()
            .into_iter()
            .map(|entry| entry.th.trim().to_string())
            .collect()
    }

    /// Sidebar badges with the active topic marked
    pub fn topic_badges(&self) -> Vec<TopicBadge> {
        self.topics
            .topics()
            .iter()
            .map(|label| TopicBadge {
                label: label.clone(),
                count: self.topics.count(label),
                active: *label == self.filter.active_topic,
            })
            .collect()
    }
}
