use crate::entry::TopicLabel;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Entry store replaced, `count` may be zero after a failed load
    DataLoaded {
        count: usize,
        source: String,
    },
    ShowRows(Vec<EntryRow>),
    ShowTopics(Vec<TopicBadge>),
    ShowVoices(Vec<VoiceRow>),
    ReadControl(ReadControl),
    /// User-visible notice (the original showed these as alerts)
    Notice(String),
    VoicesChanged {
        count: usize,
    },
    BackendReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchText(String),
    SelectTopic(TopicLabel),
    /// Speak a visible row, zero-based
    SpeakRow(usize),
    ToggleRead,
    StopRead,
    ListTopics,
    ListVoices,
    /// Load the entry list again from the configured source
    Reload,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub zh: String,
    pub th: String,
    pub rtgs: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicBadge {
    pub label: TopicLabel,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRow {
    pub name: String,
    pub lang: String,
    pub selected: bool,
}

/// State of the single read-through control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadControl {
    #[default]
    Play,
    Stop,
}

impl ReadControl {
    pub fn label(&self) -> &'static str {
        match self {
            ReadControl::Play => "▶ Read",
            ReadControl::Stop => "■ Stop",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReadControl::Play => "Read the current filtered list aloud",
            ReadControl::Stop => "Stop reading",
        }
    }
}
