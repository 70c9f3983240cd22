//! Keyword scoring formulas

use crate::types::ScoringStrategy;

/// Terms longer than this many characters count as domain vocabulary
pub const LONG_TERM_CHARS: usize = 6;

/// Multiplier applied to long terms under length-biased scoring
pub const LONG_TERM_BONUS: f64 = 1.5;

/// Score one term.
///
/// `total_tokens` must be non-zero; the extractor returns early otherwise.
/// The result is never negative.
pub fn score(strategy: ScoringStrategy, count: u32, term_chars: usize, total_tokens: usize) -> f64 {
    let count = f64::from(count);
    match strategy {
        ScoringStrategy::LengthBiasedFrequency => {
            if term_chars > LONG_TERM_CHARS {
                count * LONG_TERM_BONUS
            } else {
                count
            }
        }
        ScoringStrategy::TfIdf => {
            let total = total_tokens as f64;
            let tf = count / total;
            let idf = (total / count).ln();
            (tf * idf).max(0.0)
        }
    }
}
