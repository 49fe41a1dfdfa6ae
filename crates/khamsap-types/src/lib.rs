pub mod entry;
pub mod types;

pub use entry::{Entry, TopicLabel, ALL_TOPICS};
pub use types::{AppEvent, EntryRow, ReadControl, TopicBadge, UiEvent, VoiceRow};
