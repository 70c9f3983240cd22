//! Layer analysis service: runs both analyzers over one text.
//!
//! [`LayerAnalysisService::analyze`] gates the input on its length, detects
//! structure, extracts keywords and bundles everything into an immutable
//! [`AnalysisResult`]. Each call is a single synchronous unit of work with no
//! shared mutable state, so independent texts can be analyzed in parallel
//! ([`LayerAnalysisService::analyze_batch`]).

use std::sync::Arc;

use rayon::prelude::*;

use super::artifacts::AnalysisResult;
use super::errors::{AnalysisError, ConfigError};
use super::observer::{
    AnalysisObserver, NoopObserver, StageClock, StageReport, STAGE_GATE, STAGE_KEYWORDS,
    STAGE_STRUCTURE,
};
use super::spec::AnalysisSpec;
use crate::keywords::extractor::{ExtractorConfig, KeywordExtractor};
use crate::nlp::stopwords::StopwordFilter;
use crate::structure::StructureDetector;
use crate::types::AnalysisConfig;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for an analysis stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("analysis_stage", stage = $name).entered();
    };
}

/// Structure detector and keyword extractor sharing one configuration.
#[derive(Debug)]
pub struct LayerAnalysisService {
    config: AnalysisConfig,
    detector: StructureDetector,
    extractor: KeywordExtractor,
}

impl Default for LayerAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerAnalysisService {
    /// Service with the default configuration and built-in stopwords
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Service with a custom configuration and the built-in stopwords
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self::with_stopwords(config, StopwordFilter::builtin())
    }

    /// Service with a custom configuration and stopword set
    pub fn with_stopwords(config: AnalysisConfig, stopwords: Arc<StopwordFilter>) -> Self {
        Self {
            extractor: KeywordExtractor::with_config(ExtractorConfig::from(&config), stopwords),
            detector: StructureDetector::new(),
            config,
        }
    }

    /// Validate `spec` and build a service from it.
    ///
    /// Any error rejects the spec. Warnings are only logged, when the
    /// `tracing` feature is enabled.
    pub fn from_spec(spec: &AnalysisSpec) -> Result<Self, ConfigError> {
        let warnings = spec.validate().into_result()?;
        #[cfg(feature = "tracing")]
        for warning in &warnings {
            tracing::warn!(%warning, "analysis spec accepted with a warning");
        }
        #[cfg(not(feature = "tracing"))]
        let _ = warnings;
        Ok(Self::with_config(spec.to_config()))
    }

    /// Parse, validate and apply a JSON spec.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_spec(&AnalysisSpec::from_json(json)?)
    }

    /// Replace the structure detector (e.g. one with extra rules).
    pub fn with_detector(mut self, detector: StructureDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze `text`.
    ///
    /// Fails only when the trimmed text is shorter than
    /// `min_input_length` characters; no partial result is produced then.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_observed(text, &mut NoopObserver)
    }

    /// Analyze `text`, notifying `observer` at each stage boundary.
    pub fn analyze_observed(
        &self,
        text: &str,
        observer: &mut impl AnalysisObserver,
    ) -> Result<AnalysisResult, AnalysisError> {
        // Stage 0: length gate
        trace_stage!(STAGE_GATE);
        observer.on_stage_start(STAGE_GATE);
        let clock = StageClock::start();
        let gate = self.check_length(text);
        observer.on_stage_end(STAGE_GATE, &StageReport::new(clock.elapsed()));
        gate?;

        // Stage 1: structure
        trace_stage!(STAGE_STRUCTURE);
        observer.on_stage_start(STAGE_STRUCTURE);
        let clock = StageClock::start();
        let structure = self.detector.detect(text);
        let report = StageReport::new(clock.elapsed()).with_items(structure.len());
        observer.on_stage_end(STAGE_STRUCTURE, &report);

        // Stage 2: keywords
        trace_stage!(STAGE_KEYWORDS);
        observer.on_stage_start(STAGE_KEYWORDS);
        let clock = StageClock::start();
        let keywords = self.extractor.extract(text);
        let report = StageReport::new(clock.elapsed()).with_items(keywords.len());
        observer.on_stage_end(STAGE_KEYWORDS, &report);

        Ok(AnalysisResult::new(structure, keywords, text.to_string()))
    }

    /// Analyze independent texts in parallel; results keep input order.
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Vec<Result<AnalysisResult, AnalysisError>>
    where
        S: AsRef<str> + Sync,
    {
        texts.par_iter().map(|t| self.analyze(t.as_ref())).collect()
    }

    fn check_length(&self, text: &str) -> Result<(), AnalysisError> {
        let minimum = self.config.min_input_length;
        if minimum == 0 {
            return Ok(());
        }
        let length = text.trim().chars().count();
        if length < minimum {
            return Err(AnalysisError::InvalidInput { length, minimum });
        }
        Ok(())
    }
}

/// Convenience function: analyze `text` with the default configuration.
pub fn analyze(text: &str) -> Result<AnalysisResult, AnalysisError> {
    LayerAnalysisService::new().analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::observer::{StageTimings, STAGES};
    use crate::types::{EmptyState, Level, ScoringStrategy, Structure};

    #[test]
    fn test_heading_then_sentence() {
        let result = analyze("INTRODUCTION\n\nThis is a simple test sentence about testing.").unwrap();
        let majors: Vec<_> = result
            .structure()
            .at_level(Level::Major)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(majors, vec!["INTRODUCTION"]);
    }

    #[test]
    fn test_numbered_points() {
        let result = analyze(
            "1. First point\nSome longer explanatory content follows this line.\n2. Second point\nMore content.",
        )
        .unwrap();
        let majors: Vec<_> = result
            .structure()
            .at_level(Level::Major)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(majors, vec!["1. First point", "2. Second point"]);
    }

    #[test]
    fn test_single_keyword_among_stopwords() {
        let result = analyze("The algorithm, the algorithm and an algorithm; was it the algorithm or this algorithm?").unwrap();
        assert_eq!(result.keywords().len(), 1);
        assert_eq!(result.keywords()[0].term, "algorithm");
        assert_eq!(result.keywords()[0].frequency, 5);
    }

    #[test]
    fn test_short_input_rejected() {
        let service = LayerAnalysisService::with_config(AnalysisConfig::default().with_min_input_length(50));
        let err = service.analyze("   too short   ").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidInput {
                length: 9,
                minimum: 50
            }
        );
    }

    #[test]
    fn test_empty_input_without_minimum() {
        let result = analyze("").unwrap();
        assert_eq!(result.structure(), &Structure::Empty);
        assert!(result.keywords().is_empty());
        assert_eq!(
            result.empty_states(),
            vec![EmptyState::StructureEmpty, EmptyState::KeywordsEmpty]
        );
    }

    #[test]
    fn test_empty_input_with_minimum() {
        let service = LayerAnalysisService::with_config(AnalysisConfig::default().with_min_input_length(1));
        assert!(service.analyze("").is_err());
        assert!(service.analyze("x").is_ok());
    }

    #[test]
    fn test_minimum_counts_characters_not_bytes() {
        let service = LayerAnalysisService::with_config(AnalysisConfig::default().with_min_input_length(5));
        assert!(service.analyze("éléve").is_ok());
    }

    #[test]
    fn test_source_text_untouched() {
        let text = "  Chapter 1 \r\n\tsome body text  ";
        assert_eq!(analyze(text).unwrap().source_text(), text);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let text = "SUMMARY\n\nSpaced repetition and active recall improve long-term retention.\n\"Active Recall\" matters.";
        let service = LayerAnalysisService::new();
        assert_eq!(service.analyze(text).unwrap(), service.analyze(text).unwrap());
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let mut timings = StageTimings::new();
        let result = LayerAnalysisService::new()
            .analyze_observed("TITLE\n\nrecall, recall, recall.", &mut timings)
            .unwrap();

        let names: Vec<_> = timings.stages.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, STAGES);
        assert_eq!(
            timings.get(STAGE_STRUCTURE).unwrap().items,
            Some(result.structure().len())
        );
        assert_eq!(timings.get(STAGE_KEYWORDS).unwrap().items, Some(1));
    }

    #[test]
    fn test_observer_stops_after_rejection() {
        let mut timings = StageTimings::new();
        let service = LayerAnalysisService::with_config(AnalysisConfig::default().with_min_input_length(10));
        assert!(service.analyze_observed("short", &mut timings).is_err());
        let names: Vec<_> = timings.stages.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_GATE]);
    }

    #[test]
    fn test_batch_keeps_order() {
        let service = LayerAnalysisService::with_config(AnalysisConfig::default().with_min_input_length(3));
        let texts = vec!["OVERVIEW\n\nmemory, memory.", "no", "CHAPTER TWO"];
        let results = service.analyze_batch(&texts);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().source_text(), texts[0]);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().structure().lines()[0].text, "CHAPTER TWO");
    }

    #[test]
    fn test_from_json_spec() {
        let service = LayerAnalysisService::from_json(
            r#"{ "v": 1, "scoring": "tf_idf", "keywords": { "max": 3 } }"#,
        )
        .unwrap();
        assert_eq!(service.config().scoring, ScoringStrategy::TfIdf);
        assert_eq!(service.config().max_keywords, 3);

        let text = "alpha, alpha. beta, beta. gamma, gamma. delta, delta. epsilon, epsilon.";
        assert!(service.analyze(text).unwrap().keywords().len() <= 3);
    }

    #[test]
    fn test_from_json_rejects_invalid_spec() {
        let err = LayerAnalysisService::from_json(r#"{ "v": 1, "keywords": { "max": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = LayerAnalysisService::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_custom_stopwords() {
        let stopwords = Arc::new(StopwordFilter::from_list(&["memory"]));
        let service = LayerAnalysisService::with_stopwords(AnalysisConfig::default(), stopwords);
        let result = service.analyze("memory, memory, recall, recall").unwrap();
        let terms: Vec<_> = result.keywords().iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["recall"]);
    }
}
