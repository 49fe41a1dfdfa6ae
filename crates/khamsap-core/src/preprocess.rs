pub trait Preprocessor {
    // Default search preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        text.to_lowercase()
    }
}

pub struct SearchPreprocessor;
impl Preprocessor for SearchPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(SearchPreprocessor.process("  Khob KHUN \n"), "khob khun");
        assert_eq!(SearchPreprocessor.process(" \t "), "");
    }
}
