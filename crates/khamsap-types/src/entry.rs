use std::fmt;

use serde::{Deserialize, Serialize};

/// Printed name of the "no topic restriction" sentinel.
pub const ALL_TOPICS: &str = "ALL";

/// One vocabulary record as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display text (Chinese)
    pub zh: String,
    /// Thai text, the one that gets spoken
    pub th: String,
    /// Royal Thai General System romanization
    pub rtgs: String,
    /// Topic bucket, entries without one belong to no bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat: Option<String>,
}

impl Entry {
    pub fn new(zh: &str, th: &str, rtgs: &str, cat: Option<&str>) -> Self {
        Self {
            zh: zh.to_string(),
            th: th.to_string(),
            rtgs: rtgs.to_string(),
            cat: cat.map(str::to_string),
        }
    }

    /// Topic as a label, `None` when the entry has no `cat`
    pub fn topic(&self) -> Option<TopicLabel> {
        self.cat.as_deref().map(|c| TopicLabel::Named(c.to_string()))
    }
}

/// A topic selection: either the `ALL` sentinel or a topic taken verbatim from the data.
///
/// The sentinel is its own variant, so a data topic that happens to be spelled
/// `"ALL"` stays a regular bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TopicLabel {
    #[default]
    All,
    Named(String),
}

impl TopicLabel {
    /// Parse user input. `"ALL"` and the empty string select the sentinel.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input == ALL_TOPICS {
            TopicLabel::All
        } else {
            TopicLabel::Named(input.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TopicLabel::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TopicLabel::All => ALL_TOPICS,
            TopicLabel::Named(name) => name,
        }
    }
}

impl fmt::Display for TopicLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
