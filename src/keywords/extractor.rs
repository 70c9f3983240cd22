//! Frequency-based keyword extraction
//!
//! Steps: tokenize, detect phrases on the raw text, accumulate counts
//! (phrases weighted), keep repeated or long terms, score, rank, truncate.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::scoring::{score, LONG_TERM_CHARS};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::phrase::chunker::PhraseChunker;
use crate::types::{AnalysisConfig, Keyword, ScoringStrategy};

/// Configuration for keyword extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Maximum number of keywords returned
    pub max_keywords: usize,
    /// Frequency added per phrase occurrence
    pub phrase_weight: u32,
    pub scoring: ScoringStrategy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for ExtractorConfig {
    fn from(cfg: &AnalysisConfig) -> Self {
        Self {
            max_keywords: cfg.max_keywords,
            phrase_weight: cfg.phrase_weight,
            scoring: cfg.scoring,
        }
    }
}

/// Term counts in first-seen order
#[derive(Debug, Default)]
struct TermCounts {
    index: FxHashMap<String, usize>,
    entries: Vec<(String, u32)>,
}

impl TermCounts {
    fn add(&mut self, term: String, weight: u32) {
        match self.index.get(&term) {
            Some(&i) => self.entries[i].1 += weight,
            None => {
                self.index.insert(term.clone(), self.entries.len());
                self.entries.push((term, weight));
            }
        }
    }
}

/// Keyword extractor
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    config: ExtractorConfig,
    stopwords: Arc<StopwordFilter>,
    tokenizer: Tokenizer,
    chunker: PhraseChunker,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create an extractor with default config and the built-in stopwords
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default(), StopwordFilter::builtin())
    }

    /// Create with custom config and stopwords
    pub fn with_config(config: ExtractorConfig, stopwords: Arc<StopwordFilter>) -> Self {
        Self {
            config,
            chunker: PhraseChunker::new(Arc::clone(&stopwords)),
            tokenizer: Tokenizer::new(),
            stopwords,
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the top keywords of `text`, best first.
    ///
    /// Never fails; text without usable tokens yields an empty list.
    pub fn extract(&self, text: &str) -> Vec<Keyword> {
        let tokens = self.tokenizer.tokenize(text, &self.stopwords);
        let total_tokens = tokens.len();
        if total_tokens == 0 {
            return Vec::new();
        }

        let mut counts = TermCounts::default();
        for token in tokens {
            counts.add(token, 1);
        }
        for phrase in self.chunker.extract_phrases(text) {
            counts.add(phrase, self.config.phrase_weight);
        }

        let mut keywords: Vec<Keyword> = counts
            .entries
            .into_iter()
            .filter_map(|(term, count)| {
                let chars = term.chars().count();
                if count == 0 || (count <= 1 && chars <= LONG_TERM_CHARS) {
                    return None;
                }
                Some(Keyword {
                    score: score(self.config.scoring, count, chars, total_tokens),
                    frequency: count,
                    term,
                })
            })
            .collect();

        // Stable: ties keep first-seen order
        keywords.sort_by(|a, b| b.score.total_cmp(&a.score));
        keywords.truncate(self.config.max_keywords);
        keywords
    }
}

/// Convenience function to extract keywords with the built-in stopwords
pub fn extract_keywords(text: &str, config: &AnalysisConfig) -> Vec<Keyword> {
    KeywordExtractor::with_config(ExtractorConfig::from(config), StopwordFilter::builtin())
        .extract(text)
}
