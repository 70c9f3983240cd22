//! Keyword extraction
//!
//! Counts tokens and phrases, scores them and returns the top-ranked terms.

pub mod extractor;
pub mod scoring;

pub use extractor::KeywordExtractor;
