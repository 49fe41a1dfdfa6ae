use std::collections::{HashMap, HashSet};

use khamsap_types::{Entry, TopicLabel};

/// `ALL` followed by every distinct `cat`, in first-occurrence order.
pub fn compute_topics(entries: &[Entry]) -> Vec<TopicLabel> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut topics = vec![TopicLabel::All];

    for cat in entries.iter().filter_map(|e| e.cat.as_deref()) {
        if seen.insert(cat) {
            topics.push(TopicLabel::Named(cat.to_string()));
        }
    }

    topics
}

/// Per-topic entry counts. `ALL` maps to the total entry count.
pub fn count_by_topic(entries: &[Entry]) -> HashMap<TopicLabel, usize> {
    let mut counts = HashMap::new();
    counts.insert(TopicLabel::All, entries.len());

    for topic in entries.iter().filter_map(Entry::topic) {
        *counts.entry(topic).or_insert(0) += 1;
    }

    counts
}

/// Topic list and counts for one entry store. Rebuilt on every load.
#[derive(Debug, Clone, Default)]
pub struct TopicSummary {
    topics: Vec<TopicLabel>,
    counts: HashMap<TopicLabel, usize>,
}

impl TopicSummary {
    pub fn build(entries: &[Entry]) -> Self {
        Self {
            topics: compute_topics(entries),
            counts: count_by_topic(entries),
        }
    }

    pub fn topics(&self) -> &[TopicLabel] {
        &self.topics
    }

    /// Count for a topic, 0 for topics not present in the data
    pub fn count(&self, topic: &TopicLabel) -> usize {
        self.counts.get(topic).copied().unwrap_or(0)
    }

    pub fn contains(&self, topic: &TopicLabel) -> bool {
        topic.is_all() || self.counts.contains_key(topic)
    }
}
