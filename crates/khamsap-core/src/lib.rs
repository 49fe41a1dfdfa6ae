pub mod filter;
pub mod language;
pub mod preprocess;
pub mod state;
pub mod store;
pub mod topics;

pub use filter::{SearchQuery, compute_visible};
pub use language::Language;
pub use state::{FilterState, VocabularySession};
pub use store::EntryStore;
pub use topics::{TopicSummary, compute_topics, count_by_topic};
