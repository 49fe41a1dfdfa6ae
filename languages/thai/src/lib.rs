pub mod script;

pub use script::{contains_thai, is_thai_char};

use khamsap_core::Language;

/// Thai, the language every entry's `th` field is spoken in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThaiLanguage;

impl Language for ThaiLanguage {
    fn code(&self) -> &str {
        "th"
    }

    fn display_name(&self) -> &str {
        "Thai"
    }

    fn voice_name_hint(&self) -> &str {
        "thai"
    }
}
