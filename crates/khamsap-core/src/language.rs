/// Describes the language entries are spoken in.
pub trait Language: Send + Sync {
    /// Language identifier (ISO 639-1 code: "th", "ja", ...)
    fn code(&self) -> &str;

    /// Human-readable name
    fn display_name(&self) -> &str;

    /// Lower-case fragment expected in the name of a matching synthesis voice
    fn voice_name_hint(&self) -> &str;

    /// Language tag prefix to fall back to when no matching voice exists
    fn fallback_prefix(&self) -> &str {
        "en"
    }
}
