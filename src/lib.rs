//! # memory-layers
//!
//! Text analysis behind a progressive reading aid. A text is revealed in
//! three layers: its structural outline, its keywords, and the full text.
//!
//! - [`structure`]: heuristic heading detection with importance levels
//! - [`keywords`]: stopword-filtered, phrase-aware keyword ranking
//! - [`pipeline`]: the [`LayerAnalysisService`] that runs both and returns an
//!   immutable [`AnalysisResult`]
//! - [`layers`]: the layer model consumed by a presentation layer
//!
//! ```
//! use memory_layers::{Layer, LayerAnalysisService, LayerView};
//!
//! let service = LayerAnalysisService::new();
//! let result = service.analyze("INTRODUCTION\n\nMemory fades without review.").unwrap();
//! match result.view(Layer::Structure) {
//!     LayerView::Structure(s) => assert_eq!(s.lines()[0].text, "INTRODUCTION"),
//!     _ => unreachable!(),
//! }
//! ```

pub mod keywords;
pub mod layers;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod structure;
pub mod types;

pub use keywords::KeywordExtractor;
pub use layers::{Layer, LayerView, ReaderSession, SessionState};
pub use nlp::stopwords::StopwordFilter;
pub use pipeline::artifacts::AnalysisResult;
pub use pipeline::errors::{AnalysisError, ConfigError};
pub use pipeline::service::{analyze, LayerAnalysisService};
pub use pipeline::spec::AnalysisSpec;
pub use structure::StructureDetector;
pub use types::{AnalysisConfig, EmptyState, Keyword, Level, ScoringStrategy, StructuralLine, Structure};
