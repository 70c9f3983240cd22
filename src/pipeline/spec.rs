//! Analysis specification.
//!
//! An [`AnalysisSpec`] is the JSON form of an [`AnalysisConfig`]: a versioned
//! document whose omitted fields fall back to the defaults. Check it with
//! [`AnalysisSpec::validate`] before use.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "scoring": "tf_idf",
//!   "input": { "min_length": 50 },
//!   "keywords": { "max": 20, "phrase_weight": 2 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::types::{AnalysisConfig, ScoringStrategy};

/// Current spec version.
pub const SPEC_VERSION: u32 = 1;

fn default_version() -> u32 {
    SPEC_VERSION
}

/// Top-level analysis specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSpec {
    /// Spec version (currently `1`).
    #[serde(default = "default_version")]
    pub v: u32,

    #[serde(default)]
    pub scoring: Option<ScoringStrategy>,

    #[serde(default)]
    pub input: InputSpec,

    #[serde(default)]
    pub keywords: KeywordSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Input gate settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSpec {
    /// Minimum trimmed input length in characters.
    #[serde(default)]
    pub min_length: Option<usize>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Keyword extraction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordSpec {
    /// Maximum number of keywords returned.
    #[serde(default)]
    pub max: Option<usize>,

    /// Frequency added per phrase occurrence.
    #[serde(default)]
    pub phrase_weight: Option<u32>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for AnalysisSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            scoring: None,
            input: InputSpec::default(),
            keywords: KeywordSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl AnalysisSpec {
    /// Parse a spec from JSON. Validation is a separate step.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the spec against the defaults.
    pub fn to_config(&self) -> AnalysisConfig {
        let defaults = AnalysisConfig::default();
        AnalysisConfig {
            min_input_length: self.input.min_length.unwrap_or(defaults.min_input_length),
            max_keywords: self.keywords.max.unwrap_or(defaults.max_keywords),
            phrase_weight: self.keywords.phrase_weight.unwrap_or(defaults.phrase_weight),
            scoring: self.scoring.unwrap_or(defaults.scoring),
        }
    }
}

impl From<&AnalysisConfig> for AnalysisSpec {
    fn from(cfg: &AnalysisConfig) -> Self {
        Self {
            scoring: Some(cfg.scoring),
            input: InputSpec {
                min_length: Some(cfg.min_input_length),
                ..InputSpec::default()
            },
            keywords: KeywordSpec {
                max: Some(cfg.max_keywords),
                phrase_weight: Some(cfg.phrase_weight),
                ..KeywordSpec::default()
            },
            ..AnalysisSpec::default()
        }
    }
}
