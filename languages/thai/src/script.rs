use std::ops::RangeInclusive;

/// Unicode Thai block
const THAI_BLOCK: RangeInclusive<char> = '\u{0E00}'..='\u{0E7F}';

pub fn is_thai_char(c: char) -> bool {
    THAI_BLOCK.contains(&c)
}

/// True when the text has at least one Thai-script character.
///
/// Used at load time to flag entries whose `th` field would be spoken by a
/// Thai voice without any Thai in it.
pub fn contains_thai(text: &str) -> bool {
    text.chars().any(is_thai_char)
}
