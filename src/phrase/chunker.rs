//! Candidate phrase detection
//!
//! Works on the original text, before normalization, so that quotes and
//! capitalization are still visible. Three sources are scanned in order:
//! quoted passages, runs of capitalized words, and short runs of lowercase
//! words joined by spaces or hyphens.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::nlp::stopwords::StopwordFilter;

static QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"\n]+)"|“([^”\n]+)”|«([^»\n]+)»"#).expect("quoted phrase pattern")
});

static CAPITALIZED_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+)+\b").expect("capitalized run pattern")
});

static LOWERCASE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Ll}+").expect("lowercase word pattern"));

/// Configuration for phrase detection
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Minimum number of words in a lowercase run
    pub min_words: usize,
    /// Maximum number of words in a lowercase run
    pub max_words: usize,
    /// A lowercase run must be strictly longer than this many characters
    pub min_run_chars: usize,
    /// Phrases shorter than this many characters are dropped
    pub min_phrase_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_words: 2,
            max_words: 4,
            min_run_chars: 8,
            min_phrase_chars: 4,
        }
    }
}

/// Phrase detector
#[derive(Debug, Clone)]
pub struct PhraseChunker {
    config: ChunkerConfig,
    stopwords: Arc<StopwordFilter>,
}

impl Default for PhraseChunker {
    fn default() -> Self {
        Self::new(StopwordFilter::builtin())
    }
}

impl PhraseChunker {
    /// Create a chunker with default config
    pub fn new(stopwords: Arc<StopwordFilter>) -> Self {
        Self {
            config: ChunkerConfig::default(),
            stopwords,
        }
    }

    /// Create a chunker with custom config
    pub fn with_config(config: ChunkerConfig, stopwords: Arc<StopwordFilter>) -> Self {
        Self { config, stopwords }
    }

    /// Set the word-count bounds for lowercase runs
    pub fn with_word_bounds(mut self, min_words: usize, max_words: usize) -> Self {
        self.config.min_words = min_words;
        self.config.max_words = max_words.max(1);
        self
    }

    /// Extract lowercase, trimmed phrases from `text`.
    ///
    /// Quoted phrases come first, then capitalized runs, then lowercase runs;
    /// each group is in document order. Duplicates are kept so callers can
    /// count them.
    pub fn extract_phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        phrases.extend(self.quoted(text));
        phrases.extend(self.capitalized_runs(text));
        phrases.extend(self.lowercase_runs(text));

        phrases
            .into_iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| self.keep(p))
            .collect()
    }

    fn keep(&self, phrase: &str) -> bool {
        phrase.chars().count() >= self.config.min_phrase_chars && !self.stopwords.is_stopword(phrase)
    }

    fn quoted<'t>(&self, text: &'t str) -> impl Iterator<Item = String> + 't {
        QUOTED.captures_iter(text).filter_map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str().to_string())
        })
    }

    /// Runs of two or more capitalized words, with stopwords trimmed off both
    /// ends ("The Eiffel Tower" yields "eiffel tower").
    fn capitalized_runs(&self, text: &str) -> Vec<String> {
        CAPITALIZED_RUN
            .find_iter(text)
            .filter_map(|m| {
                let words: Vec<&str> = m.as_str().split_whitespace().collect();
                let start = words.iter().position(|w| !self.stopwords.is_stopword(w))?;
                let end = words.iter().rposition(|w| !self.stopwords.is_stopword(w))?;
                if end + 1 - start < 2 {
                    return None;
                }
                let words = &words[start..=end];
                if words.iter().all(|w| *w == words[0]) {
                    return None;
                }
                Some(words.join(" "))
            })
            .collect()
    }

    /// Runs of lowercase words separated only by spaces, tabs or a single
    /// hyphen. Stopwords and anything else break a run; long runs are cut into
    /// chunks of at most `max_words`.
    fn lowercase_runs(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut run: Vec<(usize, usize)> = Vec::new();

        for m in LOWERCASE_WORD.find_iter(text) {
            let glued = text[..m.start()].chars().next_back().is_some_and(char::is_alphanumeric)
                || text[m.end()..].chars().next().is_some_and(char::is_alphanumeric);

            if glued || self.stopwords.is_stopword(m.as_str()) {
                self.flush_run(text, &mut run, &mut out);
                continue;
            }

            if let Some(&(_, prev_end)) = run.last() {
                if !is_joiner(&text[prev_end..m.start()]) {
                    self.flush_run(text, &mut run, &mut out);
                }
            }
            run.push((m.start(), m.end()));
        }
        self.flush_run(text, &mut run, &mut out);

        out
    }

    fn flush_run(&self, text: &str, run: &mut Vec<(usize, usize)>, out: &mut Vec<String>) {
        for chunk in run.chunks(self.config.max_words.max(1)) {
            if chunk.len() < self.config.min_words {
                continue;
            }
            // A word repeated back to back is not a phrase
            let first = &text[chunk[0].0..chunk[0].1];
            if chunk.iter().all(|&(s, e)| &text[s..e] == first) {
                continue;
            }
            let phrase = &text[chunk[0].0..chunk[chunk.len() - 1].1];
            if phrase.chars().count() > self.config.min_run_chars {
                out.push(phrase.to_string());
            }
        }
        run.clear();
    }
}

/// Separator allowed between two words of a lowercase run.
fn is_joiner(gap: &str) -> bool {
    gap == "-" || (!gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t'))
}
