//! Phrase extraction components
//!
//! This module detects multi-word candidates (quoted passages, proper-noun
//! runs, short lowercase compounds) for keyword scoring.

pub mod chunker;

pub use chunker::{ChunkerConfig, PhraseChunker};
