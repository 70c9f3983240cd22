//! Keyword tokenizer
//!
//! Normalizes raw text into lowercase word tokens. Only letters from the
//! ASCII, Latin-1 Supplement and Latin Extended-A blocks, digits and
//! whitespace survive normalization; everything else becomes a word break.

use super::stopwords::StopwordFilter;

/// Minimum number of characters a token needs to be kept
pub const DEFAULT_MIN_TOKEN_CHARS: usize = 3;

/// Whether `c` survives normalization (after lowercasing).
fn is_word_char(c: char) -> bool {
    if c.is_ascii_alphanumeric() {
        return true;
    }
    match c as u32 {
        // Latin-1 Supplement letters, minus × and ÷
        0x00C0..=0x00FF => c != '\u{00D7}' && c != '\u{00F7}',
        // Latin Extended-A (œ, ā, ł, ...)
        0x0100..=0x017F => true,
        _ => false,
    }
}

/// Lowercase `text`, replace unsupported characters with spaces, collapse
/// whitespace and trim.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if is_word_char(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Splits normalized text into keyword candidates
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_token_chars: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
        }
    }

    /// Set the minimum token length in characters
    pub fn with_min_token_chars(mut self, min_token_chars: usize) -> Self {
        self.min_token_chars = min_token_chars;
        self
    }

    /// Tokenize `text`, dropping short tokens, pure numbers and stopwords.
    ///
    /// Tokens come back in document order.
    pub fn tokenize(&self, text: &str, stopwords: &StopwordFilter) -> Vec<String> {
        normalize(text)
            .split(' ')
            .filter(|token| self.keep(token, stopwords))
            .map(str::to_string)
            .collect()
    }

    fn keep(&self, token: &str, stopwords: &StopwordFilter) -> bool {
        if token.chars().count() < self.min_token_chars {
            return false;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        !stopwords.is_stopword(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Hello, World!  How's it?"), "hello world how s it");
    }

    #[test]
    fn test_normalize_keeps_accents() {
        assert_eq!(normalize("Élève — cœur; façade"), "élève cœur façade");
    }

    #[test]
    fn test_normalize_empty_and_symbols() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ***  ---  "), "");
    }

    #[test]
    fn test_tokenize_filters() {
        let stopwords = StopwordFilter::from_list(&["the"]);
        let tokens = Tokenizer::new().tokenize("The 2024 memory of an ox", &stopwords);

        assert_eq!(tokens, vec!["memory"]);
    }

    #[test]
    fn test_tokenize_keeps_alphanumeric() {
        let tokens = Tokenizer::new().tokenize("mp3 files and 42", &StopwordFilter::empty());
        assert_eq!(tokens, vec!["mp3", "files", "and"]);
    }

    #[test]
    fn test_min_token_chars() {
        let tokens = Tokenizer::new()
            .with_min_token_chars(5)
            .tokenize("short longer words", &StopwordFilter::empty());
        assert_eq!(tokens, vec!["short", "longer", "words"]);

        let tokens = Tokenizer::new()
            .with_min_token_chars(6)
            .tokenize("short longer words", &StopwordFilter::empty());
        assert_eq!(tokens, vec!["longer"]);
    }
}
