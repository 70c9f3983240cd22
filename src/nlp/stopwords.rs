//! Stopword filtering
//!
//! The default filter is a curated French + English list of function words,
//! built once per process and shared read-only. Other languages can be loaded
//! from the `stop-words` crate.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// English function words.
const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may",
    "me", "might", "more", "most", "must", "my", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "out", "over", "own", "same", "shall", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "us",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "whose", "why", "will", "with", "would", "you", "your", "yours",
];

/// French function words.
const FRENCH: &[&str] = &[
    "à", "ai", "au", "aussi", "aux", "avec", "avoir", "bien", "c", "ça", "car", "ce", "ceci",
    "cela", "ces", "cet", "cette", "chez", "comme", "d", "dans", "de", "des", "donc", "dont",
    "du", "elle", "elles", "en", "entre", "est", "et", "été", "étaient", "était", "être", "eu",
    "fait", "il", "ils", "j", "je", "l", "la", "le", "les", "leur", "leurs", "lui", "m", "ma",
    "mais", "me", "même", "mes", "moi", "moins", "mon", "n", "ne", "ni", "nos", "notre", "nous",
    "on", "ont", "ou", "où", "par", "pas", "peu", "plus", "pour", "qu", "que", "quel", "quelle",
    "qui", "quoi", "s", "sa", "sans", "se", "ses", "si", "son", "sont", "sous", "sur", "t", "ta",
    "te", "tes", "toi", "ton", "tous", "tout", "toute", "toutes", "très", "tu", "un", "une",
    "vers", "vos", "votre", "vous", "y",
];

static BUILTIN: Lazy<Arc<StopwordFilter>> = Lazy::new(|| {
    let mut filter = StopwordFilter::from_list(ENGLISH);
    filter.add_stopwords(FRENCH);
    Arc::new(filter)
});

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
    /// Whether the filter is case-sensitive
    case_sensitive: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::builtin().as_ref().clone()
    }
}

impl StopwordFilter {
    /// The shared French + English filter used by the analyzers.
    ///
    /// Built on first use and never mutated afterwards.
    pub fn builtin() -> Arc<StopwordFilter> {
        Arc::clone(&BUILTIN)
    }

    /// Create a stopword filter from the `stop-words` language pack
    ///
    /// Supported languages: en, fr, de, es, it, pt, nl. Unknown codes fall back
    /// to English.
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
            case_sensitive: false,
        }
    }

    /// Create a filter holding the union of several language packs
    pub fn for_languages(languages: &[&str]) -> Self {
        let stopwords = languages
            .iter()
            .flat_map(|lang| Self::load_stopwords(lang))
            .collect();
        Self {
            stopwords,
            case_sensitive: false,
        }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
            case_sensitive: false,
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords: FxHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            stopwords,
            case_sensitive: false,
        }
    }

    /// Set case sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stopwords.contains(word)
        } else {
            self.stopwords.contains(&word.to_lowercase())
        }
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "fr" | "french" => LANGUAGE::French,
            "de" | "german" => LANGUAGE::German,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            _ => LANGUAGE::English,
        };

        get(lang).iter().map(|s| s.to_string()).collect()
    }
}
