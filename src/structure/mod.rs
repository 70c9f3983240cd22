//! Structure detection
//!
//! Classifies the lines of a text as headings (with a level) or body text.

pub mod detector;
pub mod rules;

pub use detector::StructureDetector;
pub use rules::{LineContext, LineRule};
