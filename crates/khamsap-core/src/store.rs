use std::sync::Arc;

use khamsap_types::Entry;

/// Immutable, ordered entry list for one session.
///
/// Cloning is cheap; the entries are shared.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Arc<[Entry]>,
}

impl EntryStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Store used after a failed load
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl From<Vec<Entry>> for EntryStore {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}
