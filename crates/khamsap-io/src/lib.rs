pub mod data;

pub use data::{DataLoadError, DataSource, load_entries, load_entries_or_empty};
