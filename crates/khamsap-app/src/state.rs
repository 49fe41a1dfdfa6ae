use std::sync::Arc;

use khamsap_config::Config;
use khamsap_core::{EntryStore, VocabularySession};
use khamsap_types::TopicLabel;
use tokio::sync::RwLock;

use crate::speech::SpeechState;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: RwLock<VocabularySession>,
    pub speech: SpeechState,
}

impl AppState {
    pub fn new(config: Config, speech: SpeechState) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: RwLock::new(VocabularySession::new(EntryStore::empty())),
            speech,
        }
    }

    /// Apply the initial topic and search given on the command line
    pub async fn with_filter(self, topic: Option<&str>, search: Option<&str>) -> Self {
        {
            let mut session = self.session.write().await;
            if let Some(topic) = topic {
                session.set_topic(TopicLabel::parse(topic));
            }
            if let Some(search) = search {
                session.set_search(search);
            }
        }
        self
    }
}
